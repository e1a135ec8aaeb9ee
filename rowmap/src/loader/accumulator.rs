use std::sync::Arc;

use rowmap_config::shared::{LoaderConfig, PartialRowPolicy};
use tracing::{debug, info, warn};

use crate::bail;
use crate::conversions::Value;
use crate::conversions::row::Row;
use crate::error::{ErrorKind, RowMapResult};
use crate::loader::{Fetch, PageSource, ValueLoader};
use crate::schema::{FieldIndex, Schema};

/// Whether the next batch starts a new pass or continues the current one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadState {
    /// The next batch replaces the schema and discards all rows.
    #[default]
    Fresh,
    /// Batches append to the rows of the current pass.
    Continuing,
}

/// Rebuilds named rows from flat, possibly paginated, value batches.
///
/// A single batch loaded while [`LoadState::Fresh`] is a complete result set on its
/// own. [`RowAccumulator::accumulate_from`] switches to [`LoadState::Continuing`]
/// for the duration of a pagination loop so that every page appends to the same
/// row sequence, with rows that straddle a page boundary stitched back together.
///
/// An accumulator holds one result set at a time, build one per query.
#[derive(Debug, Default)]
pub struct RowAccumulator {
    config: LoaderConfig,
    state: LoadState,
    index: Option<Arc<FieldIndex>>,
    rows: Vec<Row>,
    /// Values of a row whose remaining columns are expected in the next page.
    pending: Vec<Value>,
}

impl RowAccumulator {
    pub fn new() -> RowAccumulator {
        Self::default()
    }

    /// Creates an accumulator with validated `config`.
    pub fn with_config(config: LoaderConfig) -> RowMapResult<RowAccumulator> {
        config.validate()?;

        Ok(Self {
            config,
            ..Self::default()
        })
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    /// Returns the schema of the current pass, if a batch has been accepted.
    pub fn schema(&self) -> Option<&Schema> {
        self.index.as_deref().map(FieldIndex::schema)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Slices `values` into rows of `schema.len()` values each and appends them.
    ///
    /// While [`LoadState::Fresh`] the schema is replaced and previous rows are
    /// discarded first, and `values` must hold a whole number of rows. While
    /// [`LoadState::Continuing`] the schema must stay the same for the whole pass and
    /// a trailing partial row is carried over to the next batch, unless the config
    /// asks for [`PartialRowPolicy::Reject`].
    ///
    /// A rejected batch leaves the accumulator untouched.
    pub fn accept_batch(&mut self, values: Vec<Value>, schema: &Schema) -> RowMapResult<()> {
        let width = schema.len();

        let (carried, existing_rows) = match self.state {
            LoadState::Fresh => (0, 0),
            LoadState::Continuing => {
                self.check_same_schema(schema)?;
                (self.pending.len(), self.rows.len())
            }
        };

        let buffered = carried + values.len();
        if width == 0 {
            if buffered > 0 {
                bail!(
                    ErrorKind::MalformedBatch,
                    "Values were supplied for a schema without columns",
                    format!("{buffered} values")
                );
            }
        } else if buffered % width != 0
            && (self.state == LoadState::Fresh
                || self.config.partial_rows == PartialRowPolicy::Reject)
        {
            bail!(
                ErrorKind::MalformedBatch,
                "The batch does not end on a row boundary",
                format!("{buffered} values for {width} columns")
            );
        }

        let complete_rows = buffered.checked_div(width).unwrap_or(0);
        if let Some(max_rows) = self.config.max_buffered_rows
            && existing_rows + complete_rows > max_rows
        {
            bail!(
                ErrorKind::RowLimitExceeded,
                "Accepting the batch would exceed the buffered row limit",
                format!(
                    "{} rows buffered, limit is {max_rows}",
                    existing_rows + complete_rows
                )
            );
        }

        let index = match self.state {
            LoadState::Fresh => self.start_pass(schema),
            LoadState::Continuing => match self.index.clone() {
                Some(index) => index,
                None => self.install_schema(schema),
            },
        };

        self.pending.extend(values);
        self.rows.reserve(complete_rows);

        let mut complete = self.pending.drain(..complete_rows * width);
        for _ in 0..complete_rows {
            let row_values = complete.by_ref().take(width).collect();
            self.rows.push(Row::new_unchecked(Arc::clone(&index), row_values));
        }
        drop(complete);

        debug!(
            rows = complete_rows,
            carried = self.pending.len(),
            total_rows = self.rows.len(),
            "accepted value batch"
        );

        Ok(())
    }

    /// Drains `source` page by page into one contiguous row sequence.
    ///
    /// Any rows from an earlier pass are discarded when the loop starts. The loop
    /// stops at the first error, which is returned as is; rows from pages loaded
    /// before the error are kept. The accumulator is back in [`LoadState::Fresh`]
    /// when this returns, whatever the outcome.
    pub fn accumulate_from<S>(&mut self, mut source: S) -> RowMapResult<()>
    where
        S: PageSource,
    {
        self.state = LoadState::Continuing;
        self.index = None;
        self.rows.clear();
        self.pending.clear();

        let mut pages = 0usize;
        let result = loop {
            match source.fetch_next(self) {
                Ok(Fetch::More) => pages += 1,
                Ok(Fetch::Done) => break self.finish_pass(pages),
                Err(err) => {
                    warn!(
                        pages,
                        rows = self.rows.len(),
                        error = %err,
                        "page source failed, stopping accumulation"
                    );
                    self.pending.clear();

                    break Err(err);
                }
            }
        };

        self.state = LoadState::Fresh;

        result
    }

    fn check_same_schema(&self, schema: &Schema) -> RowMapResult<()> {
        if let Some(index) = &self.index
            && index.schema() != schema
        {
            bail!(
                ErrorKind::SchemaMismatch,
                "A page carried a different schema than earlier pages of the same result",
                format!(
                    "expected columns [{}], got [{}]",
                    column_list(index.schema()),
                    column_list(schema)
                )
            );
        }

        Ok(())
    }

    fn start_pass(&mut self, schema: &Schema) -> Arc<FieldIndex> {
        self.rows.clear();
        self.pending.clear();

        self.install_schema(schema)
    }

    fn install_schema(&mut self, schema: &Schema) -> Arc<FieldIndex> {
        let index = Arc::new(FieldIndex::new(schema.clone()));
        self.index = Some(Arc::clone(&index));

        index
    }

    fn finish_pass(&mut self, pages: usize) -> RowMapResult<()> {
        if !self.pending.is_empty() {
            let trailing = self.pending.len();
            self.pending.clear();

            warn!(
                pages,
                rows = self.rows.len(),
                trailing,
                "page source ended in the middle of a row"
            );

            bail!(
                ErrorKind::MalformedBatch,
                "The page source ended in the middle of a row",
                format!("{trailing} trailing values")
            );
        }

        info!(pages, rows = self.rows.len(), "accumulated query results");

        Ok(())
    }
}

impl ValueLoader for RowAccumulator {
    fn load(&mut self, values: Vec<Value>, schema: &Schema) -> RowMapResult<()> {
        self.accept_batch(values, schema)
    }
}

/// Drains `source` with a new accumulator configured by `config` and returns its rows.
pub fn collect_rows<S>(source: S, config: LoaderConfig) -> RowMapResult<Vec<Row>>
where
    S: PageSource,
{
    let mut accumulator = RowAccumulator::with_config(config)?;
    accumulator.accumulate_from(source)?;

    Ok(accumulator.into_rows())
}

fn column_list(schema: &Schema) -> String {
    schema
        .iter()
        .map(|field| format!("{} {}", field.name, field.typ))
        .collect::<Vec<_>>()
        .join(", ")
}
