use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create accounts table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS accounts (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            email VARCHAR(255) NOT NULL UNIQUE,
            password_hash VARCHAR(255) NOT NULL,
            is_admin BOOLEAN NOT NULL DEFAULT FALSE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create sessions table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sessions (
            token VARCHAR(255) PRIMARY KEY,
            account_id UUID NOT NULL REFERENCES accounts(id),
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create musicians table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS musicians (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            whatsapp VARCHAR(64) NOT NULL,
            email VARCHAR(255) NOT NULL,
            active BOOLEAN NOT NULL DEFAULT TRUE,
            account_id UUID NULL REFERENCES accounts(id),
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            deleted_at TIMESTAMP WITH TIME ZONE NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create musician_unavailability table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS musician_unavailability (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            musician_id UUID NOT NULL REFERENCES musicians(id),
            start_date DATE NOT NULL,
            end_date DATE NOT NULL,
            reason TEXT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            deleted_at TIMESTAMP WITH TIME ZONE NULL,
            CONSTRAINT valid_date_range CHECK (end_date >= start_date)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create instruments table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS instruments (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create locations table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS locations (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            address TEXT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create schedules table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schedules (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            title VARCHAR(255) NOT NULL,
            date DATE NOT NULL,
            location_id UUID NULL REFERENCES locations(id),
            notes TEXT NULL,
            status VARCHAR(16) NOT NULL DEFAULT 'draft',
            created_by UUID NOT NULL REFERENCES accounts(id),
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            deleted_at TIMESTAMP WITH TIME ZONE NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create schedule_times table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schedule_times (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            schedule_id UUID NOT NULL REFERENCES schedules(id),
            start_time TIME NOT NULL,
            end_time TIME NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create schedule_rehearsals table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schedule_rehearsals (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            schedule_id UUID NOT NULL REFERENCES schedules(id),
            date DATE NOT NULL,
            start_time TIME NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create schedule_musicians table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schedule_musicians (
            schedule_id UUID NOT NULL REFERENCES schedules(id),
            musician_id UUID NOT NULL REFERENCES musicians(id),
            instrument_id UUID NOT NULL REFERENCES instruments(id),
            status VARCHAR(16) NOT NULL DEFAULT 'pending',
            notes TEXT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            PRIMARY KEY (schedule_id, musician_id)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create musician_invitations table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS musician_invitations (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            email VARCHAR(255) NOT NULL,
            token VARCHAR(255) NOT NULL UNIQUE,
            status VARCHAR(16) NOT NULL DEFAULT 'pending',
            invited_by UUID NOT NULL REFERENCES accounts(id),
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            expires_at TIMESTAMP WITH TIME ZONE NOT NULL,
            deleted_at TIMESTAMP WITH TIME ZONE NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_sessions_account_id ON sessions(account_id);
        CREATE INDEX IF NOT EXISTS idx_musicians_account_id ON musicians(account_id);
        CREATE INDEX IF NOT EXISTS idx_unavailability_musician_id ON musician_unavailability(musician_id);
        CREATE INDEX IF NOT EXISTS idx_unavailability_start_date ON musician_unavailability(start_date);
        CREATE INDEX IF NOT EXISTS idx_unavailability_end_date ON musician_unavailability(end_date);
        CREATE INDEX IF NOT EXISTS idx_schedules_date ON schedules(date);
        CREATE INDEX IF NOT EXISTS idx_schedule_times_schedule_id ON schedule_times(schedule_id);
        CREATE INDEX IF NOT EXISTS idx_schedule_rehearsals_schedule_id ON schedule_rehearsals(schedule_id);
        CREATE INDEX IF NOT EXISTS idx_schedule_musicians_musician_id ON schedule_musicians(musician_id);
        CREATE INDEX IF NOT EXISTS idx_invitations_email ON musician_invitations(email);
        CREATE INDEX IF NOT EXISTS idx_invitations_token ON musician_invitations(token);
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
