//! MS SQL Server connection implementation using tiberius

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use indexmap::IndexMap;
use sqldeck_core::{
    ColumnMeta, Connection, Preset, QueryResult, Result, Row, SqldeckError, Value,
};
use std::sync::atomic::{AtomicBool, Ordering};
use tiberius::{AuthMethod, Client, ColumnData, Config, EncryptionLevel, Row as TiberiusRow};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio_util::compat::{Compat, TokioAsyncWriteCompatExt};
use uuid::Uuid;

/// Label used in error prefixes for this engine
pub(crate) const ENGINE: &str = "MSSQL";

/// SQL Server listens on 1433 unless the instance says otherwise
pub(crate) const DEFAULT_PORT: u16 = 1433;

/// MS SQL Server connection using tiberius
///
/// The client is taken out of the mutex on disconnect so a second
/// disconnect (or a query after one) finds the slot empty instead of a
/// half-closed client.
pub struct MssqlConnection {
    client: Mutex<Option<Client<Compat<TcpStream>>>>,
    closed: AtomicBool,
    database: Option<String>,
}

impl MssqlConnection {
    /// Open a connection to SQL Server using the preset's credentials
    ///
    /// Transport options are fixed for this engine: the link is always
    /// encrypted and the server certificate is accepted without
    /// validation, matching how the notebook talks to development servers.
    #[tracing::instrument(skip(preset), fields(host = %preset.host, database = %preset.database))]
    pub async fn connect(preset: &Preset) -> Result<Self> {
        tracing::debug!("connecting to MS SQL Server");

        let mut config = Config::new();
        config.host(&preset.host);
        config.port(DEFAULT_PORT);
        if !preset.database.is_empty() {
            config.database(&preset.database);
        }
        config.trust_cert();
        config.encryption(EncryptionLevel::Required);
        config.authentication(AuthMethod::sql_server(&preset.username, &preset.password));

        let tcp = TcpStream::connect(config.get_addr())
            .await
            .map_err(|e| SqldeckError::connection_failed(ENGINE, e))?;
        tcp.set_nodelay(true)
            .map_err(|e| SqldeckError::connection_failed(ENGINE, e))?;

        let client = Client::connect(config, tcp.compat_write())
            .await
            .map_err(|e| SqldeckError::connection_failed(ENGINE, e))?;

        tracing::debug!("connected to MS SQL Server");

        Ok(Self {
            client: Mutex::new(Some(client)),
            closed: AtomicBool::new(false),
            database: (!preset.database.is_empty()).then(|| preset.database.clone()),
        })
    }
}

#[async_trait]
impl Connection for MssqlConnection {
    fn driver_name(&self) -> &str {
        "mssql"
    }

    async fn query(&self, sql: &str) -> Result<QueryResult> {
        let start = std::time::Instant::now();

        let mut guard = self.client.lock().await;
        let client = guard
            .as_mut()
            .ok_or_else(|| SqldeckError::query_failed(ENGINE, "connection is closed"))?;

        let stream = client
            .query(sql, &[])
            .await
            .map_err(|e| SqldeckError::query_failed(ENGINE, e))?;
        let tib_rows = stream
            .into_first_result()
            .await
            .map_err(|e| SqldeckError::query_failed(ENGINE, e))?;

        // The type name reported by the driver is trusted as-is; there is
        // no per-code table for this engine.
        let mut columns: IndexMap<String, ColumnMeta> = IndexMap::new();
        let mut column_names: Vec<String> = Vec::new();
        if let Some(first_row) = tib_rows.first() {
            for col in first_row.columns() {
                let name = col.name().to_string();
                column_names.push(name.clone());
                columns.insert(name, ColumnMeta::named(format!("{:?}", col.column_type())));
            }
        }

        let mut rows: Vec<Row> = Vec::with_capacity(tib_rows.len());
        for tib_row in tib_rows {
            rows.push(Row::new(column_names.clone(), row_values(tib_row)));
        }

        let execution_time_ms = start.elapsed().as_millis() as u64;
        tracing::debug!(
            row_count = rows.len(),
            duration_ms = execution_time_ms,
            "query completed"
        );

        Ok(QueryResult {
            id: Uuid::new_v4(),
            columns,
            rows,
            execution_time_ms,
        })
    }

    async fn disconnect(&self) -> Result<()> {
        let client = self.client.lock().await.take();
        self.closed.store(true, Ordering::SeqCst);

        match client {
            Some(client) => {
                client
                    .close()
                    .await
                    .map_err(|e| SqldeckError::disconnection_failed(ENGINE, e))?;
                tracing::debug!("MS SQL Server connection closed");
                Ok(())
            }
            None => {
                tracing::debug!("disconnect called on an already-closed connection");
                Ok(())
            }
        }
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

/// Convert a tiberius row into values by consuming the row
fn row_values(row: TiberiusRow) -> Vec<Value> {
    row.into_iter().map(column_data_to_value).collect()
}

/// Epoch of the legacy datetime/smalldatetime types
fn legacy_date(days: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(1900, 1, 1).unwrap() + Duration::days(days)
}

/// Epoch of the date/datetime2/datetimeoffset family
fn modern_date(days: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(1, 1, 1).unwrap() + Duration::days(days)
}

/// Time-of-day from 100ns increments (scale 7, the wire default)
pub(crate) fn time_from_increments(increments: u64) -> NaiveTime {
    NaiveTime::from_num_seconds_from_midnight_opt(
        (increments / 10_000_000) as u32,
        ((increments % 10_000_000) * 100) as u32,
    )
    .unwrap_or_default()
}

/// Convert tiberius ColumnData to a sqldeck Value
pub(crate) fn column_data_to_value(col_data: ColumnData<'static>) -> Value {
    match col_data {
        ColumnData::Bit(v) => v.map(Value::Bool).unwrap_or(Value::Null),
        ColumnData::U8(v) => v.map(|v| Value::Int32(v as i32)).unwrap_or(Value::Null),
        ColumnData::I16(v) => v.map(Value::Int16).unwrap_or(Value::Null),
        ColumnData::I32(v) => v.map(Value::Int32).unwrap_or(Value::Null),
        ColumnData::I64(v) => v.map(Value::Int64).unwrap_or(Value::Null),
        ColumnData::F32(v) => v.map(Value::Float32).unwrap_or(Value::Null),
        ColumnData::F64(v) => v.map(Value::Float64).unwrap_or(Value::Null),
        ColumnData::String(v) => v
            .map(|v| Value::String(v.into_owned()))
            .unwrap_or(Value::Null),
        ColumnData::Guid(v) => v.map(Value::Uuid).unwrap_or(Value::Null),
        ColumnData::Binary(v) => v
            .map(|v| Value::Bytes(v.into_owned()))
            .unwrap_or(Value::Null),
        ColumnData::Numeric(v) => v
            .map(|v| Value::Decimal(v.to_string()))
            .unwrap_or(Value::Null),
        ColumnData::DateTime(v) => v
            .map(|v| {
                // seconds_fragments are 1/300ths of a second
                let time = NaiveTime::from_num_seconds_from_midnight_opt(
                    (v.seconds_fragments() as f64 / 300.0) as u32,
                    0,
                )
                .unwrap_or_default();
                Value::DateTime(NaiveDateTime::new(legacy_date(v.days() as i64), time))
            })
            .unwrap_or(Value::Null),
        ColumnData::SmallDateTime(v) => v
            .map(|v| {
                // smalldatetime carries whole minutes past midnight
                let time = NaiveTime::from_num_seconds_from_midnight_opt(
                    (v.seconds_fragments() as u32) * 60,
                    0,
                )
                .unwrap_or_default();
                Value::DateTime(NaiveDateTime::new(legacy_date(v.days() as i64), time))
            })
            .unwrap_or(Value::Null),
        ColumnData::DateTime2(v) => v
            .map(|v| {
                Value::DateTime(NaiveDateTime::new(
                    modern_date(v.date().days() as i64),
                    time_from_increments(v.time().increments()),
                ))
            })
            .unwrap_or(Value::Null),
        ColumnData::DateTimeOffset(v) => v
            .map(|v| {
                let dt2 = v.datetime2();
                let naive = NaiveDateTime::new(
                    modern_date(dt2.date().days() as i64),
                    time_from_increments(dt2.time().increments()),
                );
                Value::DateTimeUtc(chrono::DateTime::from_naive_utc_and_offset(
                    naive,
                    chrono::Utc,
                ))
            })
            .unwrap_or(Value::Null),
        ColumnData::Date(v) => v
            .map(|v| Value::Date(modern_date(v.days() as i64)))
            .unwrap_or(Value::Null),
        ColumnData::Time(v) => v
            .map(|v| Value::Time(time_from_increments(v.increments())))
            .unwrap_or(Value::Null),
        ColumnData::Xml(v) => v
            .map(|v| Value::String(v.into_owned().into_string()))
            .unwrap_or(Value::Null),
    }
}

impl std::fmt::Debug for MssqlConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MssqlConnection")
            .field("database", &self.database)
            .field("closed", &self.closed.load(Ordering::SeqCst))
            .finish()
    }
}
