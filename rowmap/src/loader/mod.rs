//! Capabilities for pulling pages of query results and pushing them into a loader.
//!
//! A [`PageSource`] owns pagination: each call to [`PageSource::fetch_next`] fetches
//! one page and hands its values to a [`ValueLoader`]. The
//! [`accumulator::RowAccumulator`] is the loader that rebuilds rows from those
//! values.

use crate::conversions::Value;
use crate::error::RowMapResult;
use crate::schema::Schema;

pub mod accumulator;

/// A sink for flat value batches described by a schema.
pub trait ValueLoader {
    /// Loads `values`, laid out row after row in the column order of `schema`.
    fn load(&mut self, values: Vec<Value>, schema: &Schema) -> RowMapResult<()>;
}

/// Outcome of a successful fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fetch {
    /// A page was handed to the loader and more may follow.
    More,
    /// The result set is exhausted, nothing was loaded.
    Done,
}

/// A paginated result set that pushes one page per fetch into a loader.
///
/// Retries and timeouts are the source's own business; any error it returns
/// stops the accumulation loop as is.
pub trait PageSource {
    fn fetch_next(&mut self, loader: &mut dyn ValueLoader) -> RowMapResult<Fetch>;
}

impl<S> PageSource for &mut S
where
    S: PageSource + ?Sized,
{
    fn fetch_next(&mut self, loader: &mut dyn ValueLoader) -> RowMapResult<Fetch> {
        (**self).fetch_next(loader)
    }
}

/// One page of results: values in row-major order and the schema they follow.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub values: Vec<Value>,
    pub schema: Schema,
}

impl Page {
    pub fn new(values: Vec<Value>, schema: Schema) -> Page {
        Self { values, schema }
    }
}

/// Adapts an iterator of pages into a [`PageSource`].
///
/// Every `Ok` page is loaded and reported as [`Fetch::More`], an `Err` item is
/// returned as the fetch error, and the end of the iterator is [`Fetch::Done`].
#[derive(Debug)]
pub struct Pages<I> {
    inner: I,
}

impl<I> Pages<I>
where
    I: Iterator<Item = RowMapResult<Page>>,
{
    pub fn new(pages: impl IntoIterator<IntoIter = I>) -> Pages<I> {
        Self {
            inner: pages.into_iter(),
        }
    }
}

impl<I> PageSource for Pages<I>
where
    I: Iterator<Item = RowMapResult<Page>>,
{
    fn fetch_next(&mut self, loader: &mut dyn ValueLoader) -> RowMapResult<Fetch> {
        match self.inner.next() {
            Some(page) => {
                let Page { values, schema } = page?;
                loader.load(values, &schema)?;

                Ok(Fetch::More)
            }
            None => Ok(Fetch::Done),
        }
    }
}
