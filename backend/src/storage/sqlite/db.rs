use anyhow::Result;
use async_trait::async_trait;
use sqlx::{migrate::MigrateDatabase, sqlite::SqliteRow, Row, Sqlite, SqlitePool};
use std::sync::Arc;

use crate::storage::traits::{AppointmentStorage, MessageStorage};
use shared::{Appointment, ContactMessage};

/// DbConnection manages all database operations
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Create a new database connection, creating the database and
    /// schema if they do not exist yet
    pub async fn new(url: &str) -> Result<Self> {
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            Sqlite::create_database(url).await?
        }

        let pool = SqlitePool::connect(url).await?;
        Self::setup_schema(&pool).await?;

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Initialize a test database with a unique in-memory name
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        let test_id = uuid::Uuid::new_v4().to_string();
        let db_url = format!("file:memdb_{}?mode=memory&cache=shared", test_id);

        Self::new(&db_url).await
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS appointments (
                id TEXT PRIMARY KEY,
                client_name TEXT NOT NULL,
                client_email TEXT NOT NULL,
                client_phone TEXT NOT NULL,
                service TEXT NOT NULL,
                start_time TEXT NOT NULL,
                end_time TEXT NOT NULL,
                notes TEXT NOT NULL,
                consent_accepted INTEGER NOT NULL,
                created_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS messages (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT NOT NULL,
                message TEXT NOT NULL,
                created_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        // Index for listing appointments by start time (admin dashboard)
        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_appointments_start_time
            ON appointments(start_time);
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    fn row_to_appointment(row: &SqliteRow) -> Appointment {
        Appointment {
            id: row.get("id"),
            client_name: row.get("client_name"),
            client_email: row.get("client_email"),
            client_phone: row.get("client_phone"),
            service: row.get("service"),
            start_time: row.get("start_time"),
            end_time: row.get("end_time"),
            notes: row.get("notes"),
            consent_accepted: row.get("consent_accepted"),
            created_at: row.get("created_at"),
        }
    }
}

#[async_trait]
impl AppointmentStorage for DbConnection {
    async fn store_appointment(&self, appointment: &Appointment) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO appointments
                (id, client_name, client_email, client_phone, service,
                 start_time, end_time, notes, consent_accepted, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&appointment.id)
        .bind(&appointment.client_name)
        .bind(&appointment.client_email)
        .bind(&appointment.client_phone)
        .bind(&appointment.service)
        .bind(&appointment.start_time)
        .bind(&appointment.end_time)
        .bind(&appointment.notes)
        .bind(appointment.consent_accepted)
        .bind(&appointment.created_at)
        .execute(&*self.pool)
        .await?;
        Ok(())
    }

    async fn get_appointment(&self, appointment_id: &str) -> Result<Option<Appointment>> {
        let row = sqlx::query(
            r#"
            SELECT id, client_name, client_email, client_phone, service,
                   start_time, end_time, notes, consent_accepted, created_at
            FROM appointments
            WHERE id = ?
            "#,
        )
        .bind(appointment_id)
        .fetch_optional(&*self.pool)
        .await?;

        Ok(row.as_ref().map(Self::row_to_appointment))
    }

    async fn list_appointments(&self) -> Result<Vec<Appointment>> {
        let rows = sqlx::query(
            r#"
            SELECT id, client_name, client_email, client_phone, service,
                   start_time, end_time, notes, consent_accepted, created_at
            FROM appointments
            ORDER BY ROWID DESC
            "#,
        )
        .fetch_all(&*self.pool)
        .await?;

        Ok(rows.iter().map(Self::row_to_appointment).collect())
    }
}

#[async_trait]
impl MessageStorage for DbConnection {
    async fn store_message(&self, message: &ContactMessage) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO messages (id, name, email, message, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&message.id)
        .bind(&message.name)
        .bind(&message.email)
        .bind(&message.message)
        .bind(&message.created_at)
        .execute(&*self.pool)
        .await?;
        Ok(())
    }

    async fn list_messages(&self, limit: Option<u32>) -> Result<Vec<ContactMessage>> {
        let limit = limit.unwrap_or(u32::MAX);
        let rows = sqlx::query(
            r#"
            SELECT id, name, email, message, created_at
            FROM messages
            ORDER BY ROWID DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&*self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|r| ContactMessage {
                id: r.get("id"),
                name: r.get("name"),
                email: r.get("email"),
                message: r.get("message"),
                created_at: r.get("created_at"),
            })
            .collect())
    }
}
