//! `ActiveEntity`: lifecycle operations for one entity.

use super::traits::EntityTrait;
use crate::executor::{InsightError, InsightExecutor};
use crate::query::{Cursor, ReadRequest, SortInfo, TableIden};
use crate::table::Table;
use sea_query::{
    Asterisk, Condition, DeleteStatement, Expr, InsertStatement,
    IntoCondition, SelectStatement, UpdateStatement,
};

#[cfg(feature = "tracing")]
use crate::metrics::tracing_helpers;

/// Adapter pairing an entity strategy with its own table instance (`me`)
///
/// `me` is the row being written: fill it through [`ActiveEntity::me_mut`] before
/// `create*`/`update`. Reads build their predicates against it.
///
/// Every operation is a blocking call; run it inside a `may` coroutine when serving
/// concurrent work. The adapter holds no connection, the executor is passed in.
///
/// ```ignore
/// let mut users = ActiveEntity::new(UserEntity::default());
/// users.me_mut().set(UserColumn::Name, "Ada".into())?;
/// let id = users.create(&executor)?;
/// assert_eq!(users.find_one(&executor, None)?, Some(id));
/// ```
pub struct ActiveEntity<E: EntityTrait> {
    entity: E,
    me: E::Table,
}

impl<E: EntityTrait> ActiveEntity<E> {
    pub fn new(entity: E) -> Self {
        let me = entity.table_factory();
        Self { entity, me }
    }

    pub fn entity(&self) -> &E {
        &self.entity
    }

    pub fn me(&self) -> &E::Table {
        &self.me
    }

    pub fn me_mut(&mut self) -> &mut E::Table {
        &mut self.me
    }

    pub fn into_parts(self) -> (E, E::Table) {
        (self.entity, self.me)
    }

    fn table_name(&self) -> &'static str {
        self.me.table_name()
    }

    /// Number of rows matching `filter`; `None` counts the whole table
    ///
    /// # Errors
    ///
    /// Propagates executor and hook errors; `QueryError` if the aggregate returned no row.
    pub fn count<Ex>(&self, executor: &Ex, filter: Option<Condition>) -> Result<u64, InsightError>
    where
        Ex: InsightExecutor + ?Sized,
    {
        #[cfg(feature = "tracing")]
        let _span = tracing_helpers::entity_operation_span("count", self.table_name()).entered();

        let request = ReadRequest::new(vec![self.me.vendor().count_expression()])
            .filter_opt(filter)
            .count();
        let mut cursor = self.read(executor, request)?;
        if !cursor.next() {
            return Err(InsightError::QueryError(format!(
                "count on {} returned no row",
                self.table_name()
            )));
        }
        cursor.get::<u64>(0)
    }

    /// [`count`](Self::count) with a predicate built from `me`
    pub fn count_where<Ex, F>(&self, executor: &Ex, filter: F) -> Result<u64, InsightError>
    where
        Ex: InsightExecutor + ?Sized,
        F: FnOnce(&E::Table) -> Expr,
    {
        let condition = filter(&self.me).into_condition();
        self.count(executor, Some(condition))
    }

    /// First key matching `filter`, if any
    ///
    /// # Errors
    ///
    /// Same as [`find`](Self::find).
    pub fn find_one<Ex>(
        &self,
        executor: &Ex,
        filter: Option<Condition>,
    ) -> Result<Option<E::Key>, InsightError>
    where
        Ex: InsightExecutor + ?Sized,
    {
        Ok(self.find(executor, filter)?.into_iter().next())
    }

    pub fn find_one_where<Ex, F>(&self, executor: &Ex, filter: F) -> Result<Option<E::Key>, InsightError>
    where
        Ex: InsightExecutor + ?Sized,
        F: FnOnce(&E::Table) -> Expr,
    {
        let condition = filter(&self.me).into_condition();
        self.find_one(executor, Some(condition))
    }

    /// Keys of every row matching `filter`, in result order
    ///
    /// # Errors
    ///
    /// Propagates executor and hook errors; `ParseError` if a key cannot be decoded.
    pub fn find<Ex>(&self, executor: &Ex, filter: Option<Condition>) -> Result<Vec<E::Key>, InsightError>
    where
        Ex: InsightExecutor + ?Sized,
    {
        #[cfg(feature = "tracing")]
        let _span = tracing_helpers::entity_operation_span("find", self.table_name()).entered();

        let id_col = self.entity.id_col(&self.me);
        let request = ReadRequest::new(vec![Expr::col(id_col)]).filter_opt(filter);
        let mut cursor = self.read(executor, request)?;

        let mut keys = Vec::with_capacity(cursor.remaining());
        while cursor.next() {
            keys.push(cursor.get::<E::Key>(0)?);
        }
        Ok(keys)
    }

    pub fn find_where<Ex, F>(&self, executor: &Ex, filter: F) -> Result<Vec<E::Key>, InsightError>
    where
        Ex: InsightExecutor + ?Sized,
        F: FnOnce(&E::Table) -> Expr,
    {
        let condition = filter(&self.me).into_condition();
        self.find(executor, Some(condition))
    }

    /// General read: builds the select described by `request`, passes it through
    /// `before_read` and returns a cursor over the result
    ///
    /// A request without fields selects `*`.
    ///
    /// # Errors
    ///
    /// Propagates the `before_read` error (nothing is executed) and executor errors.
    pub fn read<Ex>(&self, executor: &Ex, request: ReadRequest) -> Result<Cursor, InsightError>
    where
        Ex: InsightExecutor + ?Sized,
    {
        let ReadRequest {
            fields,
            filter,
            sort,
            limit,
            offset,
            is_count,
        } = request;

        let mut select = SelectStatement::default();
        if fields.is_empty() {
            select.column(Asterisk);
        } else {
            select.exprs(fields);
        }
        select.from(TableIden(self.table_name()));
        if let Some(filter) = filter {
            select.cond_where(filter);
        }
        for SortInfo { expr, order } in sort {
            select.order_by_expr(expr, order);
        }
        if let Some(limit) = limit {
            select.limit(limit);
        }
        if let Some(offset) = offset {
            select.offset(offset);
        }

        self.entity.before_read(&mut select, is_count)?;

        let (sql, values) = self.me.vendor().build_select(&select);
        let rows = executor.query_all(&sql, &values)?;
        log::trace!(
            "[{}] read {} row(s) from {}",
            self.vendor_name(),
            rows.len(),
            self.table_name(),
        );
        Ok(Cursor::new(rows))
    }

    /// Create a row keyed `id` unless one already exists; `true` if it was created
    ///
    /// # Errors
    ///
    /// Same as [`count`](Self::count) and [`create_with_id`](Self::create_with_id).
    pub fn create_if_not_exist<Ex>(&mut self, executor: &Ex, id: E::Key) -> Result<bool, InsightError>
    where
        Ex: InsightExecutor + ?Sized,
    {
        if self.exists(executor, &id)? {
            log::debug!(
                "[{}] {} {:?} already exists, not creating",
                self.vendor_name(),
                self.table_name(),
                id,
            );
            return Ok(false);
        }
        self.create_with_id(executor, id)?;
        Ok(true)
    }

    /// Create the row keyed `id`, or update it if it already exists
    ///
    /// # Errors
    ///
    /// Same as [`create_with_id`](Self::create_with_id) and [`update`](Self::update).
    pub fn create_or_update<Ex>(&mut self, executor: &Ex, id: E::Key) -> Result<(), InsightError>
    where
        Ex: InsightExecutor + ?Sized,
    {
        if self.exists(executor, &id)? {
            self.update(executor, &id)?;
        } else {
            self.create_with_id(executor, id)?;
        }
        Ok(())
    }

    /// Create a row under a freshly generated key and return that key
    ///
    /// # Errors
    ///
    /// Same as [`create_with_id`](Self::create_with_id).
    pub fn create<Ex>(&mut self, executor: &Ex) -> Result<E::Key, InsightError>
    where
        Ex: InsightExecutor + ?Sized,
    {
        let id = self.entity.generate_key();
        self.create_with_id(executor, id)
    }

    /// Install `id` into `me`, run `before_create` and insert every set column
    ///
    /// # Errors
    ///
    /// `QueryError` if no column is set, otherwise propagates hook and executor errors.
    pub fn create_with_id<Ex>(&mut self, executor: &Ex, id: E::Key) -> Result<E::Key, InsightError>
    where
        Ex: InsightExecutor + ?Sized,
    {
        #[cfg(feature = "tracing")]
        let _span = tracing_helpers::entity_operation_span("create", self.table_name()).entered();

        self.entity.setup_id(&mut self.me, &id)?;
        self.entity.before_create(&mut self.me, &id)?;

        let (columns, exprs): (Vec<_>, Vec<_>) = self
            .me
            .set_values()
            .into_iter()
            .map(|(column, value)| (column, Expr::val(value)))
            .unzip();
        if columns.is_empty() {
            return Err(InsightError::QueryError(format!(
                "no columns set to insert into {}",
                self.table_name()
            )));
        }

        let mut insert = InsertStatement::default();
        insert
            .into_table(TableIden(self.table_name()))
            .columns(columns)
            .values(exprs)
            .map_err(|e| InsightError::QueryError(e.to_string()))?;

        let (sql, values) = self.me.vendor().build_insert(&insert);
        executor.execute(&sql, &values)?;
        log::debug!("[{}] created {} {:?}", self.vendor_name(), self.table_name(), id);
        Ok(id)
    }

    /// Update the row keyed `id` with the set columns of `me`
    ///
    /// The key column itself is never written. Returns the number of rows affected,
    /// 0 without touching the database when nothing is set.
    ///
    /// # Errors
    ///
    /// `RecordNotFound` if no row has key `id`; otherwise propagates hook and executor
    /// errors.
    pub fn update<Ex>(&mut self, executor: &Ex, id: &E::Key) -> Result<u64, InsightError>
    where
        Ex: InsightExecutor + ?Sized,
    {
        #[cfg(feature = "tracing")]
        let _span = tracing_helpers::entity_operation_span("update", self.table_name()).entered();

        let Some(stored) = self.load_stored(executor, id)? else {
            log::debug!(
                "[{}] update of missing {} {:?}",
                self.vendor_name(),
                self.table_name(),
                id,
            );
            return Err(InsightError::RecordNotFound {
                table: self.table_name(),
                key: id.clone().into(),
            });
        };
        self.entity.before_update(&mut self.me, id, &stored)?;

        let id_col = self.entity.id_col(&self.me);
        let assignments: Vec<_> = self
            .me
            .set_values()
            .into_iter()
            .filter(|(column, _)| *column != id_col)
            .collect();
        if assignments.is_empty() {
            log::debug!(
                "[{}] nothing to update on {} {:?}",
                self.vendor_name(),
                self.table_name(),
                id,
            );
            return Ok(0);
        }

        let mut update = UpdateStatement::default();
        update.table(TableIden(self.table_name()));
        for (column, value) in assignments {
            update.value(column, Expr::val(value));
        }
        update.cond_where(self.entity.eq_id_expr(&self.me, id));

        let (sql, values) = self.me.vendor().build_update(&update);
        let affected = executor.execute(&sql, &values)?;
        log::debug!(
            "[{}] updated {} {:?} ({affected} row(s))",
            self.vendor_name(),
            self.table_name(),
            id,
        );
        Ok(affected)
    }

    /// Delete the row keyed `id`; 0 if there is none
    ///
    /// # Errors
    ///
    /// Propagates hook and executor errors.
    pub fn remove<Ex>(&self, executor: &Ex, id: &E::Key) -> Result<u64, InsightError>
    where
        Ex: InsightExecutor + ?Sized,
    {
        #[cfg(feature = "tracing")]
        let _span = tracing_helpers::entity_operation_span("remove", self.table_name()).entered();

        let Some(stored) = self.load_stored(executor, id)? else {
            log::debug!(
                "[{}] remove of missing {} {:?}",
                self.vendor_name(),
                self.table_name(),
                id,
            );
            return Ok(0);
        };
        self.entity.before_remove(id, &stored)?;

        let target = self.entity.table_factory();
        let mut delete = DeleteStatement::default();
        delete
            .from_table(TableIden(target.table_name()))
            .cond_where(self.entity.eq_id_expr(&target, id));

        let (sql, values) = target.vendor().build_delete(&delete);
        let affected = executor.execute(&sql, &values)?;
        log::debug!(
            "[{}] removed {} {:?} ({affected} row(s))",
            self.vendor_name(),
            self.table_name(),
            id,
        );
        Ok(affected)
    }

    fn vendor_name(&self) -> &'static str {
        self.me.vendor().name()
    }

    fn exists<Ex>(&self, executor: &Ex, id: &E::Key) -> Result<bool, InsightError>
    where
        Ex: InsightExecutor + ?Sized,
    {
        let condition = self.entity.eq_id_expr(&self.me, id).into_condition();
        Ok(self.count(executor, Some(condition))? > 0)
    }

    /// Fresh table instance holding the `fields_to_check` columns of row `id`,
    /// or just the key column if the entity checks none. Bypasses `before_read`.
    fn load_stored<Ex>(&self, executor: &Ex, id: &E::Key) -> Result<Option<E::Table>, InsightError>
    where
        Ex: InsightExecutor + ?Sized,
    {
        let mut stored = self.entity.table_factory();
        let mut fields = self.entity.fields_to_check(&stored);
        if fields.is_empty() {
            fields.push(self.entity.id_col(&stored));
        }

        let mut select = SelectStatement::default();
        select
            .columns(fields.iter().copied())
            .from(TableIden(stored.table_name()))
            .cond_where(self.entity.eq_id_expr(&stored, id))
            .limit(1);

        let (sql, values) = stored.vendor().build_select(&select);
        let Some(row) = executor.query_all(&sql, &values)?.into_iter().next() else {
            return Ok(None);
        };
        for (column, value) in fields.into_iter().zip(row.into_values()) {
            stored.set(column, value)?;
        }
        Ok(Some(stored))
    }
}
