//! Integration tests for the entity lifecycle against a real PostgreSQL database.
//!
//! Set `TEST_DATABASE_URL` to run them; without it every test returns early.
//! Each test uses its own key range so they can share one table.

use fake::faker::name::en::Name;
use fake::Fake;
use insight_orm::coroutine::in_coroutine;
use insight_orm::test_helpers::TestDatabase;
use insight_orm::{
    ActiveEntity, ActiveValue, ColumnTrait, EntityTrait, InsightError, InsightExecutor,
    MayPostgresExecutor, ReadRequest, SortInfo, Table,
};
use rand::Rng;
use sea_query::{Expr, Iden, IdenStatic, Value};
use std::cell::Cell;

#[derive(Copy, Clone, Debug, PartialEq)]
enum PetColumn {
    Id,
    Name,
    Visits,
}

impl Iden for PetColumn {
    fn unquoted(&self) -> &str {
        self.as_str()
    }
}

impl IdenStatic for PetColumn {
    fn as_str(&self) -> &'static str {
        match self {
            PetColumn::Id => "id",
            PetColumn::Name => "name",
            PetColumn::Visits => "visits",
        }
    }
}

#[derive(Clone, Debug, Default)]
struct Pets {
    id: ActiveValue,
    name: ActiveValue,
    visits: ActiveValue,
}

impl Table for Pets {
    type Column = PetColumn;

    fn table_name(&self) -> &'static str {
        "insight_test_pets"
    }

    fn columns(&self) -> Vec<PetColumn> {
        vec![PetColumn::Id, PetColumn::Name, PetColumn::Visits]
    }

    fn get(&self, column: PetColumn) -> ActiveValue {
        match column {
            PetColumn::Id => self.id.clone(),
            PetColumn::Name => self.name.clone(),
            PetColumn::Visits => self.visits.clone(),
        }
    }

    fn set(&mut self, column: PetColumn, value: Value) -> Result<(), InsightError> {
        let slot = match column {
            PetColumn::Id => &mut self.id,
            PetColumn::Name => &mut self.name,
            PetColumn::Visits => &mut self.visits,
        };
        *slot = ActiveValue::Set(value);
        Ok(())
    }
}

/// Bumps `visits` on every update, based on the stored count
struct PetEntity {
    next_id: Cell<i64>,
}

impl PetEntity {
    fn new() -> Self {
        // random base keeps parallel test runs apart
        let base = rand::thread_rng().gen_range(1..1_000_000_000i64) * 1_000;
        Self {
            next_id: Cell::new(base),
        }
    }
}

impl EntityTrait for PetEntity {
    type Key = i64;
    type Table = Pets;

    fn table_factory(&self) -> Pets {
        Pets::default()
    }

    fn generate_key(&self) -> i64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }

    fn setup_id(&self, table: &mut Pets, id: &i64) -> Result<(), InsightError> {
        table.set(PetColumn::Id, (*id).into())
    }

    fn eq_id_expr(&self, _table: &Pets, id: &i64) -> Expr {
        PetColumn::Id.eq(*id)
    }

    fn id_col(&self, _table: &Pets) -> PetColumn {
        PetColumn::Id
    }

    fn before_create(&self, table: &mut Pets, _id: &i64) -> Result<(), InsightError> {
        table.set(PetColumn::Visits, 0i32.into())
    }

    fn fields_to_check(&self, _table: &Pets) -> Vec<PetColumn> {
        vec![PetColumn::Id, PetColumn::Visits]
    }

    fn before_update(&self, table: &mut Pets, _id: &i64, stored: &Pets) -> Result<(), InsightError> {
        let visits = match stored.visits.as_value() {
            Some(Value::Int(Some(v))) => *v,
            _ => 0,
        };
        table.set(PetColumn::Visits, (visits + 1).into())
    }
}

fn setup() -> Option<(MayPostgresExecutor, ActiveEntity<PetEntity>)> {
    let Some(db) = TestDatabase::from_env() else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return None;
    };
    let executor = db.executor().expect("Failed to connect to test database");
    TestDatabase::run_script(
        &executor,
        &["CREATE TABLE IF NOT EXISTS insight_test_pets (
            id BIGINT PRIMARY KEY,
            name TEXT,
            visits INTEGER NOT NULL DEFAULT 0
        )"],
    )
    .expect("Failed to set up schema");
    Some((executor, ActiveEntity::new(PetEntity::new())))
}

fn key_range(pets: &ActiveEntity<PetEntity>) -> sea_query::Condition {
    let base = pets.entity().next_id.get();
    sea_query::Condition::all()
        .add(PetColumn::Id.gte(base))
        .add(PetColumn::Id.lt(base + 1_000))
}

#[test]
fn test_create_then_find_contains_key_once() {
    let Some((executor, mut pets)) = setup() else { return };
    let range = key_range(&pets);

    let name: String = Name().fake();
    pets.me_mut().set(PetColumn::Name, name.into()).unwrap();
    let id = pets.create(&executor).expect("create failed");

    let keys = pets.find(&executor, Some(range)).expect("find failed");
    assert_eq!(keys.iter().filter(|k| **k == id).count(), 1);

    assert_eq!(pets.remove(&executor, &id).unwrap(), 1);
}

#[test]
fn test_absent_key() {
    let Some((executor, pets)) = setup() else { return };
    let missing = pets.entity().next_id.get() + 999;

    assert_eq!(pets.count_where(&executor, |_| PetColumn::Id.eq(missing)).unwrap(), 0);
    assert_eq!(pets.find_one_where(&executor, |_| PetColumn::Id.eq(missing)).unwrap(), None);
    assert_eq!(pets.remove(&executor, &missing).unwrap(), 0);
}

#[test]
fn test_update_missing_key_is_not_found() {
    let Some((executor, mut pets)) = setup() else { return };
    let missing = pets.entity().next_id.get() + 998;
    pets.me_mut().set(PetColumn::Name, "ghost".into()).unwrap();

    let err = pets.update(&executor, &missing).unwrap_err();
    assert!(matches!(err, InsightError::RecordNotFound { .. }));
    assert_eq!(pets.count_where(&executor, |_| PetColumn::Id.eq(missing)).unwrap(), 0);
}

#[test]
fn test_create_if_not_exist_and_create_or_update() {
    let Some((executor, mut pets)) = setup() else { return };
    let id = pets.entity().generate_key();

    assert!(pets.create_if_not_exist(&executor, id).unwrap());
    assert!(!pets.create_if_not_exist(&executor, id).unwrap());

    pets.me_mut().set(PetColumn::Name, "Rex".into()).unwrap();
    pets.create_or_update(&executor, id).unwrap();
    pets.create_or_update(&executor, id).unwrap();

    let mut cursor = pets
        .read(
            &executor,
            ReadRequest::columns([PetColumn::Name, PetColumn::Visits])
                .filter(PetColumn::Id.eq(id)),
        )
        .unwrap();
    assert!(cursor.next());
    assert_eq!(cursor.get::<String>(0).unwrap(), "Rex");
    assert_eq!(cursor.get::<i32>(1).unwrap(), 2);
    assert!(!cursor.next());

    assert_eq!(pets.remove(&executor, &id).unwrap(), 1);
}

#[test]
fn test_read_sorts_and_pages() {
    let Some((executor, mut pets)) = setup() else { return };
    let range = key_range(&pets);

    let mut ids = Vec::new();
    for _ in 0..4 {
        ids.push(pets.create(&executor).unwrap());
    }

    let mut cursor = pets
        .read(
            &executor,
            ReadRequest::columns([PetColumn::Id])
                .filter(range)
                .sort(SortInfo::desc(PetColumn::Id))
                .limit(2)
                .offset(1),
        )
        .unwrap();
    let mut page = Vec::new();
    while cursor.next() {
        page.push(cursor.get::<i64>(0).unwrap());
    }
    assert_eq!(page, vec![ids[2], ids[1]]);

    for id in &ids {
        pets.remove(&executor, id).unwrap();
    }
}

#[test]
fn test_create_count_remove_count() {
    let Some((executor, mut pets)) = setup() else { return };
    let range = key_range(&pets);

    assert_eq!(pets.count(&executor, Some(range.clone())).unwrap(), 0);
    let id = pets.create(&executor).unwrap();
    assert_eq!(pets.count(&executor, Some(range.clone())).unwrap(), 1);
    assert_eq!(pets.remove(&executor, &id).unwrap(), 1);
    assert_eq!(pets.count(&executor, Some(range)).unwrap(), 0);

    let rows = executor
        .query_all(
            "SELECT id FROM insight_test_pets WHERE id = $1",
            &sea_query::Values(vec![id.into()]),
        )
        .unwrap();
    assert!(rows.is_empty());
}

#[test]
fn test_entities_on_concurrent_coroutines() {
    let Some(db) = TestDatabase::from_env() else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return;
    };
    drop(setup());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let db = db.clone();
            may::go!(move || -> Result<(i64, u64, u64), InsightError> {
                let executor = db.executor()?;
                let mut pets = ActiveEntity::new(PetEntity::new());
                let id = pets.create(&executor)?;
                let found = pets.count_where(&executor, |_| PetColumn::Id.eq(id))?;
                let removed = pets.remove(&executor, &id)?;
                Ok((id, found, removed))
            })
        })
        .collect();

    for handle in handles {
        let (id, found, removed) = handle
            .join()
            .expect("coroutine panicked")
            .expect("entity lifecycle failed");
        assert_eq!(found, 1, "key {id} not visible after create");
        assert_eq!(removed, 1);
    }
}

#[test]
fn test_lifecycle_inside_in_coroutine() {
    let Some(db) = TestDatabase::from_env() else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return;
    };
    drop(setup());

    let remaining = in_coroutine(move || {
        let executor = db.executor()?;
        let mut pets = ActiveEntity::new(PetEntity::new());
        let id = pets.create(&executor)?;
        pets.me_mut().set(PetColumn::Name, "Momo".into())?;
        pets.update(&executor, &id)?;
        pets.remove(&executor, &id)?;
        pets.count_where(&executor, |_| PetColumn::Id.eq(id))
    })
    .expect("lifecycle failed");
    assert_eq!(remaining, 0);
}
