// ==========================================
// 入库批次汇总引擎 - 配置管理器
// ==========================================
// 职责: 全局设置加载、查询、覆写
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::db::{configure_sqlite_connection, open_sqlite_connection};
use crate::domain::settings::{GlobalSettings, UnitTable};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> ConfigResult<Self> {
        let conn = open_sqlite_connection(db_path)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> ConfigResult<Self> {
        {
            let conn_guard = lock(&conn)?;
            configure_sqlite_connection(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    /// 建表 (config_scope / config_kv) 并插入 global scope
    pub fn ensure_schema(&self) -> ConfigResult<()> {
        let conn = lock(&self.conn)?;

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS config_scope (
                scope_id TEXT PRIMARY KEY,
                scope_type TEXT NOT NULL,
                scope_key TEXT NOT NULL,
                created_at TEXT NOT NULL DEFAULT (datetime('now')),
                UNIQUE(scope_type, scope_key)
            );

            CREATE TABLE IF NOT EXISTS config_kv (
                scope_id TEXT NOT NULL REFERENCES config_scope(scope_id) ON DELETE CASCADE,
                key TEXT NOT NULL,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL DEFAULT (datetime('now')),
                PRIMARY KEY (scope_id, key)
            );

            INSERT OR IGNORE INTO config_scope (scope_id, scope_type, scope_key)
            VALUES ('global', 'GLOBAL', 'global');
            "#,
        )?;

        Ok(())
    }

    /// 读取 global scope 的配置值
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_global_config_value(&self, key: &str) -> ConfigResult<Option<String>> {
        let conn = lock(&self.conn)?;

        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;

        Ok(value)
    }

    /// 写入 global scope 的配置值 (已存在则覆写)
    pub fn set_global_config_value(&self, key: &str, value: &str) -> ConfigResult<()> {
        let conn = lock(&self.conn)?;

        conn.execute(
            r#"
            INSERT INTO config_kv (scope_id, key, value, updated_at)
            VALUES ('global', ?1, ?2, datetime('now'))
            ON CONFLICT(scope_id, key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
            params![key, value],
        )?;

        debug!(key, value, "配置已写入");
        Ok(())
    }

    // ==========================================
    // 全局设置
    // ==========================================

    /// 加载全局设置
    ///
    /// 未配置的键使用 GlobalSettings::default()
    pub fn get_global_settings(&self) -> ConfigResult<GlobalSettings> {
        let defaults = GlobalSettings::default();

        let settings = GlobalSettings {
            metric: self.get_bool(config_keys::DISPLAY_METRIC, defaults.metric)?,
            fudge_case_packed: self
                .get_bool(config_keys::FUDGE_CASE_PACKED, defaults.fudge_case_packed)?,
            multipack_calculate_shipment_quantity: self.get_bool(
                config_keys::MULTIPACK_CALCULATE_SHIPMENT_QUANTITY,
                defaults.multipack_calculate_shipment_quantity,
            )?,
            units: UnitTable {
                length_multiplier: self.get_multiplier(
                    config_keys::UNIT_LENGTH_MULTIPLIER,
                    defaults.units.length_multiplier,
                )?,
                mass_multiplier: self.get_multiplier(
                    config_keys::UNIT_MASS_MULTIPLIER,
                    defaults.units.mass_multiplier,
                )?,
            },
        };

        info!(
            unit_system = %settings.unit_system(),
            fudge_case_packed = settings.fudge_case_packed,
            multipack_calculate_shipment_quantity = settings.multipack_calculate_shipment_quantity,
            "已加载全局设置"
        );

        Ok(settings)
    }

    fn get_bool(&self, key: &str, default: bool) -> ConfigResult<bool> {
        match self.get_global_config_value(key)? {
            Some(value) => parse_bool(key, &value),
            None => Ok(default),
        }
    }

    fn get_multiplier(&self, key: &str, default: f64) -> ConfigResult<f64> {
        let value = match self.get_global_config_value(key)? {
            Some(value) => value,
            None => return Ok(default),
        };

        match value.trim().parse::<f64>() {
            Ok(multiplier) if multiplier.is_finite() && multiplier > 0.0 => Ok(multiplier),
            Ok(_) => Err(invalid(key, &value, "换算系数必须为正数")),
            Err(e) => Err(invalid(key, &value, &e.to_string())),
        }
    }
}

fn lock(conn: &Arc<Mutex<Connection>>) -> ConfigResult<MutexGuard<'_, Connection>> {
    conn.lock()
        .map_err(|e| ConfigError::LockError(e.to_string()))
}

fn parse_bool(key: &str, value: &str) -> ConfigResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(invalid(key, value, "期望布尔值 (true/false/1/0)")),
    }
}

fn invalid(key: &str, value: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        message: message.to_string(),
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 显示单位
    pub const DISPLAY_METRIC: &str = "display_metric";

    // 整箱判定
    pub const FUDGE_CASE_PACKED: &str = "fudge_case_packed";
    pub const MULTIPACK_CALCULATE_SHIPMENT_QUANTITY: &str =
        "multipack_calculate_shipment_quantity";

    // 单位换算表
    pub const UNIT_LENGTH_MULTIPLIER: &str = "unit_length_multiplier";
    pub const UNIT_MASS_MULTIPLIER: &str = "unit_mass_multiplier";
}
