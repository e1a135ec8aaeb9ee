use rowmap::{ErrorKind, Fetch, PageSource, RowMapResult, Schema, Value, ValueLoader, rowmap_error};

use crate::common::test_schema::student_schema;

/// Replays a fixed list of value pages against one schema, one page per fetch.
pub struct ScriptedSource {
    pages: Vec<Vec<Value>>,
    schema: Schema,
    next_page: usize,
}

impl ScriptedSource {
    pub fn new(pages: Vec<Vec<Value>>) -> ScriptedSource {
        Self {
            pages,
            schema: student_schema(),
            next_page: 0,
        }
    }

    /// Splits `values` into pages of at most `page_size` values.
    pub fn chunked(values: Vec<Value>, page_size: usize) -> ScriptedSource {
        Self::new(values.chunks(page_size).map(<[Value]>::to_vec).collect())
    }

    pub fn fetched_pages(&self) -> usize {
        self.next_page
    }
}

impl PageSource for ScriptedSource {
    fn fetch_next(&mut self, loader: &mut dyn ValueLoader) -> RowMapResult<Fetch> {
        let Some(values) = self.pages.get(self.next_page) else {
            return Ok(Fetch::Done);
        };

        loader.load(values.clone(), &self.schema)?;
        self.next_page += 1;

        Ok(Fetch::More)
    }
}

/// Serves the pages of an inner source, then fails every later fetch.
pub struct FailingSource {
    inner: ScriptedSource,
    fail_after: usize,
    fetches: usize,
}

impl FailingSource {
    pub fn new(inner: ScriptedSource, fail_after: usize) -> FailingSource {
        Self {
            inner,
            fail_after,
            fetches: 0,
        }
    }

    pub fn fetches(&self) -> usize {
        self.fetches
    }
}

impl PageSource for FailingSource {
    fn fetch_next(&mut self, loader: &mut dyn ValueLoader) -> RowMapResult<Fetch> {
        self.fetches += 1;
        if self.fetches > self.fail_after {
            return Err(rowmap_error!(
                ErrorKind::SourceError,
                "Fetching the next page failed",
                "backend unavailable"
            ));
        }

        self.inner.fetch_next(loader)
    }
}
