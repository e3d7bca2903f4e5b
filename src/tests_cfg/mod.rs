//! Test entity shared by the unit tests.
//!
//! `users(id BIGINT PRIMARY KEY, name TEXT)` with an entity that records every hook
//! call and can be told to fail one of them.

#![cfg(test)]

use crate::entity::EntityTrait;
use crate::executor::InsightError;
use crate::query::ColumnTrait;
use crate::table::{ActiveValue, Table};
use sea_query::{Expr, Iden, IdenStatic, SelectStatement, Value};
use std::cell::{Cell, RefCell};

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum UserColumn {
    Id,
    Name,
}

impl Iden for UserColumn {
    fn unquoted(&self) -> &str {
        self.as_str()
    }
}

impl IdenStatic for UserColumn {
    fn as_str(&self) -> &'static str {
        match self {
            UserColumn::Id => "id",
            UserColumn::Name => "name",
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Users {
    pub id: ActiveValue,
    pub name: ActiveValue,
}

impl Table for Users {
    type Column = UserColumn;

    fn table_name(&self) -> &'static str {
        "users"
    }

    fn columns(&self) -> Vec<UserColumn> {
        vec![UserColumn::Id, UserColumn::Name]
    }

    fn get(&self, column: UserColumn) -> ActiveValue {
        match column {
            UserColumn::Id => self.id.clone(),
            UserColumn::Name => self.name.clone(),
        }
    }

    fn set(&mut self, column: UserColumn, value: Value) -> Result<(), InsightError> {
        match column {
            UserColumn::Id => self.id = ActiveValue::Set(value),
            UserColumn::Name => self.name = ActiveValue::Set(value),
        }
        Ok(())
    }
}

/// Which hook `UserEntity` should reject
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FailingHook {
    Read,
    Create,
    Update,
    Remove,
}

#[derive(Default)]
pub struct UserEntity {
    next_id: Cell<i64>,
    pub hook_log: RefCell<Vec<String>>,
    pub failing: Option<FailingHook>,
    /// Overrides the default `[Id]` returned by `fields_to_check`
    pub checked: Option<Vec<UserColumn>>,
}

impl UserEntity {
    pub fn starting_at(first_id: i64) -> Self {
        Self {
            next_id: Cell::new(first_id),
            ..Self::default()
        }
    }

    pub fn failing(hook: FailingHook) -> Self {
        Self {
            failing: Some(hook),
            ..Self::default()
        }
    }

    pub fn checking(columns: Vec<UserColumn>) -> Self {
        Self {
            checked: Some(columns),
            ..Self::default()
        }
    }

    pub fn hooks(&self) -> Vec<String> {
        self.hook_log.borrow().clone()
    }

    fn log(&self, entry: String, hook: FailingHook) -> Result<(), InsightError> {
        self.hook_log.borrow_mut().push(entry);
        if self.failing == Some(hook) {
            return Err(InsightError::Other(format!("{hook:?} hook rejected")));
        }
        Ok(())
    }
}

impl EntityTrait for UserEntity {
    type Key = i64;
    type Table = Users;

    fn table_factory(&self) -> Users {
        Users::default()
    }

    fn generate_key(&self) -> i64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }

    fn setup_id(&self, table: &mut Users, id: &i64) -> Result<(), InsightError> {
        table.set(UserColumn::Id, (*id).into())
    }

    fn eq_id_expr(&self, _table: &Users, id: &i64) -> Expr {
        UserColumn::Id.eq(*id)
    }

    fn id_col(&self, _table: &Users) -> UserColumn {
        UserColumn::Id
    }

    fn before_read(&self, _select: &mut SelectStatement, is_count: bool) -> Result<(), InsightError> {
        self.log(format!("before_read(is_count={is_count})"), FailingHook::Read)
    }

    fn before_create(&self, _table: &mut Users, id: &i64) -> Result<(), InsightError> {
        self.log(format!("before_create({id})"), FailingHook::Create)
    }

    fn fields_to_check(&self, _table: &Users) -> Vec<UserColumn> {
        self.checked.clone().unwrap_or_else(|| vec![UserColumn::Id])
    }

    fn before_update(&self, _table: &mut Users, id: &i64, stored: &Users) -> Result<(), InsightError> {
        let stored_name = stored.name.as_value().cloned();
        self.log(
            format!("before_update({id}, stored_name={stored_name:?})"),
            FailingHook::Update,
        )
    }

    fn before_remove(&self, id: &i64, _stored: &Users) -> Result<(), InsightError> {
        self.log(format!("before_remove({id})"), FailingHook::Remove)
    }
}
