//! Read requests.
//!
//! A [`ReadRequest`] is the argument list of `ActiveEntity::read`: projected fields,
//! an optional predicate, a sort list, limit/offset and whether the read is a count.

use sea_query::{Condition, Expr, IntoColumnRef, IntoCondition, Order};

/// One ORDER BY term
#[derive(Debug, Clone)]
pub struct SortInfo {
    pub expr: Expr,
    pub order: Order,
}

impl SortInfo {
    pub fn new(expr: Expr, order: Order) -> Self {
        Self { expr, order }
    }

    /// Ascending order on a column
    pub fn asc<C: IntoColumnRef>(column: C) -> Self {
        Self::new(Expr::col(column), Order::Asc)
    }

    /// Descending order on a column
    pub fn desc<C: IntoColumnRef>(column: C) -> Self {
        Self::new(Expr::col(column), Order::Desc)
    }
}

/// Description of a general-purpose read
///
/// # Example
///
/// ```
/// use insight_orm::{ReadRequest, SortInfo};
/// use sea_query::{Expr, ExprTrait};
///
/// let request = ReadRequest::columns(["id", "name"])
///     .filter(Expr::col("active").eq(true))
///     .sort(SortInfo::desc("id"))
///     .limit(10)
///     .offset(20);
/// assert_eq!(request.fields().len(), 2);
/// assert!(!request.is_count());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReadRequest {
    pub(crate) fields: Vec<Expr>,
    pub(crate) filter: Option<Condition>,
    pub(crate) sort: Vec<SortInfo>,
    pub(crate) limit: Option<u64>,
    pub(crate) offset: Option<u64>,
    pub(crate) is_count: bool,
}

impl ReadRequest {
    /// Read projecting arbitrary expressions
    pub fn new(fields: Vec<Expr>) -> Self {
        Self {
            fields,
            ..Self::default()
        }
    }

    /// Read projecting plain columns
    pub fn columns<C, I>(columns: I) -> Self
    where
        C: IntoColumnRef,
        I: IntoIterator<Item = C>,
    {
        Self::new(columns.into_iter().map(Expr::col).collect())
    }

    /// Add a predicate; several calls are combined with AND
    pub fn filter<F: IntoCondition>(mut self, condition: F) -> Self {
        let condition = condition.into_condition();
        self.filter = Some(match self.filter.take() {
            Some(existing) => Condition::all().add(existing).add(condition),
            None => condition,
        });
        self
    }

    /// Add a predicate if one is given; `None` leaves the read unfiltered
    pub fn filter_opt(self, condition: Option<Condition>) -> Self {
        match condition {
            Some(condition) => self.filter(condition),
            None => self,
        }
    }

    pub fn sort(mut self, sort: SortInfo) -> Self {
        self.sort.push(sort);
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Mark the read as a count-style read (seen by `before_read`)
    pub fn count(mut self) -> Self {
        self.is_count = true;
        self
    }

    pub fn fields(&self) -> &[Expr] {
        &self.fields
    }

    pub fn filter_condition(&self) -> Option<&Condition> {
        self.filter.as_ref()
    }

    pub fn sorts(&self) -> &[SortInfo] {
        &self.sort
    }

    pub fn limit_value(&self) -> Option<u64> {
        self.limit
    }

    pub fn offset_value(&self) -> Option<u64> {
        self.offset
    }

    pub fn is_count(&self) -> bool {
        self.is_count
    }
}
