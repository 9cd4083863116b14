#![allow(dead_code)]

use std::{env, sync::OnceLock};

use log::LevelFilter;
use schema_cast::{Field, FieldDescriptor, FieldType};

static LOGGER: OnceLock<()> = OnceLock::new();

/// Installs `env_logger` once per test binary; `RUST_LOG` overrides the level.
pub fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("schema_cast", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().is_test(true).try_init();
    });
}

/// Builds a bound field the way the table-schema tests declare them.
pub fn field(field_type: FieldType, format: &str, required: bool) -> Field {
    init_logging();
    Field::new(
        FieldDescriptor::new("Name", field_type)
            .with_format(format)
            .with_required(required),
    )
    .expect("valid field descriptor")
}

pub fn required(field_type: FieldType) -> Field {
    field(field_type, "default", true)
}
