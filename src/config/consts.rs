// src/config/consts.rs

// Local store
pub const STORE_DIR: &str = ".store";
pub const LOG_FILE: &str = "debug.log";
pub const KV_SUBDIR: &str = "kv";
pub const CONFIG_FILE: &str = "metricas.toml";

// Store keys (kept stable so existing stores stay readable)
pub const KEY_BASELINE: &str = "metricas_estado_inicial";
pub const KEY_BASELINE_AT: &str = "metricas_timestamp_inicial";
pub const KEY_CHANGES: &str = "metricas_cambios";
pub const KEY_HISTORY: &str = "metricas_historial";

// Detection
pub const TICK_SECS: u64 = 5;
pub const HISTORY_LIMIT: usize = 500;

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const EXPORT_PREFIX: &str = "metricas_snii_viep_";
pub const EXPORT_EXT: &str = "json";

// Landing page markers
pub const DOI_MARKER: &str = "DOI";
pub const PATENTS_HEADING: &str = "Patentes";
pub const BOOKS_HEADING: &str = "Libros";

pub const LINK_ORCID: &str = "orcid.org";
pub const LINK_CVU: &str = "cvu";
pub const LINK_SCHOLAR: &str = "scholar.google";
pub const LINK_RESEARCHGATE: &str = "researchgate.net";
pub const LINK_LINKEDIN: &str = "linkedin.com";
