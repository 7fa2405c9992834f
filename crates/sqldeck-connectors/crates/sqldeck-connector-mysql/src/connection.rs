//! MySQL connection implementation using mysql_async

use crate::types::type_name;
use async_trait::async_trait;
use indexmap::IndexMap;
use mysql_async::{
    Opts, OptsBuilder, Pool, PoolConstraints, PoolOpts, Row as MySqlRow, consts::ColumnType,
    prelude::*,
};
use sqldeck_core::{
    ColumnMeta, Connection, Preset, QueryResult, Result, Row, SqldeckError, Value,
};
use std::sync::atomic::{AtomicBool, Ordering};
use uuid::Uuid;

/// Label used in error prefixes for this engine
pub(crate) const ENGINE: &str = "MySQL";

/// MySQL listens on 3306 unless the server says otherwise
pub(crate) const DEFAULT_PORT: u16 = 3306;

/// MySQL connection wrapper
///
/// Holds a min-1/max-1 pool purely as the driver's handle-management
/// vehicle; the pool lives for one dispatch cycle and is torn down by
/// `disconnect`, never shared across cycles.
pub struct MySqlConnection {
    pool: Pool,
    closed: AtomicBool,
}

impl MySqlConnection {
    /// Connect to a MySQL database using the preset's credentials
    #[tracing::instrument(skip(preset), fields(host = %preset.host, database = %preset.database))]
    pub async fn connect(preset: &Preset) -> Result<Self> {
        tracing::debug!("connecting to MySQL");

        let mut builder = OptsBuilder::from_opts(Opts::default())
            .ip_or_hostname(preset.host.clone())
            .tcp_port(DEFAULT_PORT);

        if !preset.database.is_empty() {
            builder = builder.db_name(Some(preset.database.clone()));
        }
        if !preset.username.is_empty() {
            builder = builder.user(Some(preset.username.clone()));
        }
        if !preset.password.is_empty() {
            builder = builder.pass(Some(preset.password.clone()));
        }

        let constraints = PoolConstraints::new(1, 1).ok_or_else(|| {
            SqldeckError::connection_failed(ENGINE, "invalid pool constraints (min=1, max=1)")
        })?;
        builder = builder.pool_opts(
            PoolOpts::default()
                .with_constraints(constraints)
                .with_reset_connection(false),
        );

        let pool = Pool::new(Opts::from(builder));

        // Verify connectivity up front by acquiring and releasing a
        // connection; pool creation itself never touches the network.
        pool.get_conn()
            .await
            .map_err(|e| SqldeckError::connection_failed(ENGINE, e))?;

        tracing::debug!("connected to MySQL");

        Ok(Self {
            pool,
            closed: AtomicBool::new(false),
        })
    }
}

#[async_trait]
impl Connection for MySqlConnection {
    fn driver_name(&self) -> &str {
        "mysql"
    }

    async fn query(&self, sql: &str) -> Result<QueryResult> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(SqldeckError::query_failed(ENGINE, "connection is closed"));
        }
        let start = std::time::Instant::now();

        let mut conn = self
            .pool
            .get_conn()
            .await
            .map_err(|e| SqldeckError::query_failed(ENGINE, e))?;

        let mysql_rows: Vec<MySqlRow> = conn
            .query(sql)
            .await
            .map_err(|e| SqldeckError::query_failed(ENGINE, e))?;

        let mut columns: IndexMap<String, ColumnMeta> = IndexMap::new();
        let mut column_names: Vec<String> = Vec::new();
        let mut column_types: Vec<ColumnType> = Vec::new();

        if let Some(first_row) = mysql_rows.first() {
            for col in first_row.columns_ref() {
                let name = col.name_str().to_string();
                column_names.push(name.clone());
                column_types.push(col.column_type());
                columns.insert(name, ColumnMeta::named(type_name(col.column_type() as u8)));
            }
        }

        let mut rows: Vec<Row> = Vec::with_capacity(mysql_rows.len());
        for mysql_row in mysql_rows {
            let mut values = Vec::with_capacity(column_names.len());
            for idx in 0..column_names.len() {
                let mysql_val: mysql_async::Value =
                    mysql_row.get(idx).unwrap_or(mysql_async::Value::NULL);
                let col_type = column_types
                    .get(idx)
                    .copied()
                    .unwrap_or(ColumnType::MYSQL_TYPE_STRING);
                values.push(mysql_value_to_value(mysql_val, col_type));
            }
            rows.push(Row::new(column_names.clone(), values));
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
        if self.closed.swap(true, Ordering::SeqCst) {
            tracing::debug!("disconnect called on an already-closed connection");
            return Ok(());
        }

        self.pool
            .clone()
            .disconnect()
            .await
            .map_err(|e| SqldeckError::disconnection_failed(ENGINE, e))?;

        tracing::debug!("MySQL connection pool closed");
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

/// Convert a mysql_async value to a sqldeck value, using the column type
/// to interpret byte strings from the text protocol.
pub(crate) fn mysql_value_to_value(val: mysql_async::Value, col_type: ColumnType) -> Value {
    match val {
        mysql_async::Value::NULL => Value::Null,
        mysql_async::Value::Bytes(bytes) => match String::from_utf8(bytes) {
            Ok(s) => decode_text_value(s, col_type),
            Err(e) => Value::Bytes(e.into_bytes()),
        },
        mysql_async::Value::Int(i) => Value::Int64(i),
        mysql_async::Value::UInt(u) => {
            if u <= i64::MAX as u64 {
                Value::Int64(u as i64)
            } else {
                Value::String(u.to_string())
            }
        }
        mysql_async::Value::Float(f) => Value::Float32(f),
        mysql_async::Value::Double(d) => Value::Float64(d),
        mysql_async::Value::Date(year, month, day, hour, min, sec, micro) => {
            let date = chrono::NaiveDate::from_ymd_opt(year as i32, month as u32, day as u32);
            if hour == 0 && min == 0 && sec == 0 && micro == 0 {
                match date {
                    Some(date) => Value::Date(date),
                    None => Value::String(format!("{:04}-{:02}-{:02}", year, month, day)),
                }
            } else {
                match date
                    .and_then(|d| d.and_hms_micro_opt(hour as u32, min as u32, sec as u32, micro))
                {
                    Some(dt) => Value::DateTime(dt),
                    None => Value::String(format!(
                        "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
                        year, month, day, hour, min, sec
                    )),
                }
            }
        }
        // TIME values can exceed 24 hours and be negative, which NaiveTime
        // cannot hold, so they stay textual.
        mysql_async::Value::Time(negative, days, hours, mins, secs, micros) => {
            let total_hours = (days as u32) * 24 + (hours as u32);
            let sign = if negative { "-" } else { "" };
            Value::String(format!(
                "{}{:02}:{:02}:{:02}.{:06}",
                sign, total_hours, mins, secs, micros
            ))
        }
    }
}

/// Text-protocol results arrive as byte strings; the column type decides
/// how to interpret them.
fn decode_text_value(s: String, col_type: ColumnType) -> Value {
    match col_type {
        ColumnType::MYSQL_TYPE_TINY
        | ColumnType::MYSQL_TYPE_SHORT
        | ColumnType::MYSQL_TYPE_LONG
        | ColumnType::MYSQL_TYPE_LONGLONG
        | ColumnType::MYSQL_TYPE_INT24
        | ColumnType::MYSQL_TYPE_YEAR => s
            .parse::<i64>()
            .map(Value::Int64)
            .unwrap_or(Value::String(s)),
        ColumnType::MYSQL_TYPE_FLOAT => s
            .parse::<f32>()
            .map(Value::Float32)
            .unwrap_or(Value::String(s)),
        ColumnType::MYSQL_TYPE_DOUBLE => s
            .parse::<f64>()
            .map(Value::Float64)
            .unwrap_or(Value::String(s)),
        ColumnType::MYSQL_TYPE_DECIMAL | ColumnType::MYSQL_TYPE_NEWDECIMAL => Value::Decimal(s),
        ColumnType::MYSQL_TYPE_JSON => serde_json::from_str(&s)
            .map(Value::Json)
            .unwrap_or(Value::String(s)),
        _ => Value::String(s),
    }
}

impl std::fmt::Debug for MySqlConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlConnection")
            .field("closed", &self.closed.load(Ordering::SeqCst))
            .finish()
    }
}
