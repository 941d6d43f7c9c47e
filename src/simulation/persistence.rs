//! Agent persistence
//!
//! Stores hold one flat row per agent. `save_all` replaces everything that was
//! stored before (delete, then insert), so the store always mirrors the last
//! saved agent set.

use duckdb::{params, Connection, Transaction};

use super::error::PersistenceError;

/// One persisted agent row
#[derive(Debug, Clone, PartialEq)]
pub struct AgentRecord {
    pub id: i64,
    pub x: f64,
    pub y: f64,
    pub name: String,
    /// Radians
    pub heading: f64,
    pub speed: f64,
    /// Behavior state code, 1-4
    pub state: i32,
    /// Area type code, 1-5
    pub work_zone_type: i32,
    /// Area type code, 1-5
    pub home_zone_type: i32,
}

/// Row store keyed by agent id
pub trait AgentStore {
    /// Every stored row
    fn load_all(&mut self) -> Result<Vec<AgentRecord>, PersistenceError>;

    /// Replace the stored rows with `records`
    fn save_all(&mut self, records: &[AgentRecord]) -> Result<(), PersistenceError>;
}

impl<S: AgentStore + ?Sized> AgentStore for Box<S> {
    fn load_all(&mut self) -> Result<Vec<AgentRecord>, PersistenceError> {
        (**self).load_all()
    }

    fn save_all(&mut self, records: &[AgentRecord]) -> Result<(), PersistenceError> {
        (**self).save_all(records)
    }
}

/// In-process store, lost on exit
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<AgentRecord>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<AgentRecord>) -> Self {
        Self { records, saves: 0 }
    }

    pub fn records(&self) -> &[AgentRecord] {
        &self.records
    }

    /// Number of successful `save_all` calls
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl AgentStore for MemoryStore {
    fn load_all(&mut self) -> Result<Vec<AgentRecord>, PersistenceError> {
        Ok(self.records.clone())
    }

    fn save_all(&mut self, records: &[AgentRecord]) -> Result<(), PersistenceError> {
        self.records = records.to_vec();
        self.saves += 1;
        Ok(())
    }
}

/// DuckDB-backed store with a single `npcs` table
pub struct DuckDbStore {
    conn: Connection,
}

impl DuckDbStore {
    /// Open or create a database file
    pub fn open(path: &str) -> Result<Self, PersistenceError> {
        let conn = Connection::open(path)?;
        let mut store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self, PersistenceError> {
        let conn = Connection::open_in_memory()?;
        let mut store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    fn initialize_schema(&mut self) -> Result<(), PersistenceError> {
        self.conn.execute(
            "create table if not exists npcs (
                id bigint primary key,
                x double not null,
                y double not null,
                name text not null,
                heading double not null,
                speed double not null,
                state integer not null,
                work_zone_type integer not null,
                home_zone_type integer not null
            )",
            [],
        )?;
        Ok(())
    }

    fn insert_records(tx: &Transaction<'_>, records: &[AgentRecord]) -> Result<(), duckdb::Error> {
        let mut stmt = tx.prepare(
            "insert into npcs (
                id, x, y, name, heading, speed, state, work_zone_type, home_zone_type
            ) values (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )?;
        for record in records {
            stmt.execute(params![
                record.id,
                record.x,
                record.y,
                record.name,
                record.heading,
                record.speed,
                record.state,
                record.work_zone_type,
                record.home_zone_type,
            ])?;
        }
        Ok(())
    }
}

impl AgentStore for DuckDbStore {
    fn load_all(&mut self) -> Result<Vec<AgentRecord>, PersistenceError> {
        let mut stmt = self.conn.prepare(
            "select id, x, y, name, heading, speed, state, work_zone_type, home_zone_type
             from npcs
             order by id asc",
        )?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(AgentRecord {
                id: row.get(0)?,
                x: row.get(1)?,
                y: row.get(2)?,
                name: row.get(3)?,
                heading: row.get(4)?,
                speed: row.get(5)?,
                state: row.get(6)?,
                work_zone_type: row.get(7)?,
                home_zone_type: row.get(8)?,
            });
        }
        Ok(records)
    }

    fn save_all(&mut self, records: &[AgentRecord]) -> Result<(), PersistenceError> {
        let tx = self.conn.transaction()?;
        tx.execute("delete from npcs", [])?;
        Self::insert_records(&tx, records)?;
        tx.commit()?;
        Ok(())
    }
}
