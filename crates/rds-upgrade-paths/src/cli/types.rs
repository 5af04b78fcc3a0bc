//! CLI value enums and domain type conversions.

use clap::ValueEnum;

use crate::domain::Engine;

/// Engine for CLI arguments
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineArg {
    /// RDS for PostgreSQL
    Postgres,
    /// RDS for MySQL
    Mysql,
    /// RDS for MariaDB
    Mariadb,
    /// Aurora MySQL-compatible edition
    AuroraMysql,
    /// Aurora PostgreSQL-compatible edition
    AuroraPostgresql,
}

impl From<EngineArg> for Engine {
    fn from(arg: EngineArg) -> Self {
        match arg {
            EngineArg::Postgres => Engine::Postgres,
            EngineArg::Mysql => Engine::Mysql,
            EngineArg::Mariadb => Engine::Mariadb,
            EngineArg::AuroraMysql => Engine::AuroraMysql,
            EngineArg::AuroraPostgresql => Engine::AuroraPostgresql,
        }
    }
}

impl std::fmt::Display for EngineArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Engine::from(*self))
    }
}
