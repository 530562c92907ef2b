//! Configuration file handling: loading the build document and pulling the
//! general and machine records out of it.
//!
//! The document is a YAML sequence of mappings, each tagged by its `option`
//! key. Nothing here validates field contents; absent keys stay `None` and are
//! rendered as empty strings later.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Deserializer};
use serde_yaml::Value;
use tracing::debug;

use crate::error::{ReportError, Result};
use crate::types::{FieldValue, RecordKind, VmMod};
use crate::yaml11;

/// File name looked up next to the executable when no path is given
pub const DEFAULT_CONFIG_NAME: &str = "build.yaml";

/// Parsed configuration document: the records in source order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub records: Vec<Value>,
}

impl Document {
    pub fn new(records: Vec<Value>) -> Self {
        Self { records }
    }

    /// Records carrying the given discriminator, in document order
    pub fn records_of(&self, kind: RecordKind) -> impl Iterator<Item = &Value> {
        self.records
            .iter()
            .filter(move |record| RecordKind::of(record) == Some(kind))
    }

    fn from_value(value: Value) -> std::result::Result<Self, String> {
        match value {
            Value::Sequence(records) => Ok(Self::new(records)),
            Value::Null => Ok(Self::default()),
            Value::Bool(_) => Err("a boolean".to_string()),
            Value::Number(_) => Err("a number".to_string()),
            Value::String(_) => Err("a string".to_string()),
            Value::Mapping(_) => Err("a mapping".to_string()),
            Value::Tagged(tagged) => Self::from_value(tagged.value),
        }
    }

    fn parse_at(content: &str, path: &Path) -> Result<Self> {
        // A file holding only comments or whitespace has no records
        if content
            .lines()
            .map(str::trim)
            .all(|line| line.is_empty() || line.starts_with('#'))
        {
            return Ok(Self::default());
        }

        let content = yaml11::normalize_booleans(content);
        let value: Value =
            serde_yaml::from_str(&content).map_err(|source| ReportError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;

        Self::from_value(value).map_err(|found| ReportError::ConfigShape {
            path: path.to_path_buf(),
            found,
        })
    }
}

impl FromStr for Document {
    type Err = ReportError;

    /// Parse in-memory configuration text; errors name `<inline>` as the path.
    fn from_str(content: &str) -> Result<Self> {
        Self::parse_at(content, Path::new("<inline>"))
    }
}

/// Project-wide namespace settings
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GeneralConfig {
    #[serde(default)]
    pub tld: Option<FieldValue>,
    #[serde(default)]
    pub domain: Option<FieldValue>,
    #[serde(default)]
    pub project: Option<FieldValue>,
}

impl GeneralConfig {
    /// Keys of this record that are absent or null
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("tld", &self.tld),
            ("domain", &self.domain),
            ("project", &self.project),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_none())
        .map(|(key, _)| key)
        .collect()
    }
}

/// One virtual machine definition
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MachineConfig {
    #[serde(default)]
    pub name: Option<FieldValue>,
    #[serde(default)]
    pub description: Option<FieldValue>,
    #[serde(default)]
    pub enabled: Option<FieldValue>,
    #[serde(default)]
    pub primary: Option<FieldValue>,
    #[serde(default, rename = "box")]
    pub box_name: Option<FieldValue>,
    #[serde(default)]
    pub box_url: Option<FieldValue>,
    #[serde(default)]
    pub hostname: Option<FieldValue>,
    #[serde(default)]
    pub cpus: Option<FieldValue>,
    #[serde(default)]
    pub memory: Option<FieldValue>,
    #[serde(default)]
    pub gui: Option<FieldValue>,
    #[serde(default, deserialize_with = "lenient_vm_mods")]
    pub vm_mods: Vec<VmMod>,
    #[serde(default)]
    pub private_ip: Option<FieldValue>,
    #[serde(default)]
    pub provision: Option<FieldValue>,
    #[serde(default)]
    pub playbook: Option<FieldValue>,
}

impl MachineConfig {
    /// Whether the provisioning block belongs in the report
    pub fn provisioned(&self) -> bool {
        self.provision.as_ref().is_some_and(FieldValue::is_truthy)
    }

    /// Keys of this record that are absent or null.
    ///
    /// `playbook` only counts when provisioning is on, and an empty `vm_mods`
    /// list is not reported.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing: Vec<&'static str> = [
            ("name", &self.name),
            ("description", &self.description),
            ("enabled", &self.enabled),
            ("primary", &self.primary),
            ("box", &self.box_name),
            ("box_url", &self.box_url),
            ("hostname", &self.hostname),
            ("cpus", &self.cpus),
            ("memory", &self.memory),
            ("gui", &self.gui),
            ("private_ip", &self.private_ip),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_none())
        .map(|(key, _)| key)
        .collect();

        if self.provisioned() && self.playbook.is_none() {
            missing.push("playbook");
        }
        missing
    }
}

/// camelCase spellings accepted in place of the snake_case keys
const KEY_ALIASES: [(&str, &str); 3] = [
    ("box_url", "boxUrl"),
    ("vm_mods", "vmMods"),
    ("private_ip", "privateIp"),
];

/// Copy of `record` with camelCase aliases folded into their snake_case
/// keys. When both spellings are present the snake_case one wins.
fn canonical_record(record: &Value) -> Value {
    let mut record = record.clone();
    if let Some(map) = record.as_mapping_mut() {
        for (key, alias) in KEY_ALIASES {
            if let Some(value) = map.remove(alias) {
                if !map.contains_key(key) {
                    map.insert(Value::from(key), value);
                }
            }
        }
    }
    record
}

/// Accept any shape for `vm_mods`: non-sequences become empty and entries
/// that are not mappings are dropped.
fn lenient_vm_mods<'de, D>(deserializer: D) -> std::result::Result<Vec<VmMod>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let Some(Value::Sequence(entries)) = value else {
        return Ok(Vec::new());
    };

    Ok(entries
        .into_iter()
        .filter(Value::is_mapping)
        .filter_map(|entry| serde_yaml::from_value(entry).ok())
        .collect())
}

/// Location of `build.yaml` next to the running executable
pub fn default_config_path() -> Result<PathBuf> {
    let exe = std::env::current_exe()?;
    let dir = exe.parent().unwrap_or_else(|| Path::new("."));
    Ok(dir.join(DEFAULT_CONFIG_NAME))
}

/// Read and parse the configuration document at `path`.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Document> {
    let path = path.as_ref();
    debug!("Loading configuration from {}", path.display());

    let content = fs::read_to_string(path).map_err(|source| ReportError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;

    let document = Document::parse_at(&content, path)?;
    debug!("Loaded {} records", document.records.len());
    Ok(document)
}

/// First `general` record, if the document has one.
pub fn extract_general(doc: &Document) -> Option<GeneralConfig> {
    let record = doc.records_of(RecordKind::General).next()?;
    let general = serde_yaml::from_value(canonical_record(record)).unwrap_or_else(|e| {
        debug!("Reading general record failed: {}", e);
        GeneralConfig::default()
    });
    Some(general)
}

/// Every `machine` record in document order.
pub fn extract_machines(doc: &Document) -> Vec<MachineConfig> {
    doc.records_of(RecordKind::Machine)
        .map(|record| {
            serde_yaml::from_value(canonical_record(record)).unwrap_or_else(|e| {
                debug!("Reading machine record failed: {}", e);
                MachineConfig::default()
            })
        })
        .collect()
}
