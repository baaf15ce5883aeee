use serde::Deserialize;

use crate::error::PickError;

// ---------------------------------------------------------------------------
// Depot registry
// ---------------------------------------------------------------------------

/// A named warehouse profile. The label prefix is the literal text that
/// precedes the sticker identifier on every page of that depot's label
/// documents.
#[derive(Debug)]
pub struct DepotProfile {
    pub name: &'static str,
    pub label_prefix: &'static str,
}

/// Closed set of supported depots. Adding a depot means adding a row here;
/// config files can only select by name.
const DEPOTS: &[DepotProfile] = &[
    DepotProfile { name: "fbs_204514", label_prefix: "FBS: 204514" },
    DepotProfile { name: "fbs_309817", label_prefix: "FBS: 309817" },
    DepotProfile { name: "rfbs_117205", label_prefix: "rFBS: 117205" },
];

pub fn depots() -> &'static [DepotProfile] {
    DEPOTS
}

pub fn depot_profile(name: &str) -> Option<&'static DepotProfile> {
    DEPOTS.iter().find(|d| d.name == name)
}

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct PickConfig {
    pub name: String,
    pub depot: String,
    pub files: FilesConfig,
    #[serde(default)]
    pub columns: ColumnMapping,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FilesConfig {
    /// Orders CSV, resolved relative to the config file.
    pub orders: String,
    /// Label document (PDF), resolved relative to the config file.
    pub labels: String,
}

// ---------------------------------------------------------------------------
// Column mapping
// ---------------------------------------------------------------------------

/// Header names in the orders CSV. Defaults are the marketplace export's
/// own headers; overriding them supports re-exported or translated files.
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnMapping {
    #[serde(default = "default_order_id")]
    pub order_id: String,
    #[serde(default = "default_product_name")]
    pub product_name: String,
    #[serde(default = "default_article")]
    pub article: String,
    #[serde(default = "default_quantity")]
    pub quantity: String,
    #[serde(default = "default_shipment_id")]
    pub shipment_id: String,
}

fn default_order_id() -> String {
    "Номер заказа".into()
}
fn default_product_name() -> String {
    "Наименование товара".into()
}
fn default_article() -> String {
    "Артикул".into()
}
fn default_quantity() -> String {
    "Количество".into()
}
fn default_shipment_id() -> String {
    "Номер отправления".into()
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            order_id: default_order_id(),
            product_name: default_product_name(),
            article: default_article(),
            quantity: default_quantity(),
            shipment_id: default_shipment_id(),
        }
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub numbering: NumberingMode,
    /// Picklist CSV path; omitted means no picklist file.
    #[serde(default)]
    pub picklist: Option<String>,
    /// JSON result path; omitted means no JSON file.
    #[serde(default)]
    pub json: Option<String>,
}

/// How combined-row codes relate to main-row codes when both lists are
/// presented. Continuous numbering reads as one catalogue; standalone
/// restarts the combined list at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberingMode {
    Standalone,
    Continuous,
}

impl Default for NumberingMode {
    fn default() -> Self {
        Self::Continuous
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl PickConfig {
    pub fn from_toml(input: &str) -> Result<Self, PickError> {
        let config: PickConfig =
            toml::from_str(input).map_err(|e| PickError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), PickError> {
        if depot_profile(&self.depot).is_none() {
            return Err(PickError::UnknownDepot(self.depot.clone()));
        }
        if self.files.orders.is_empty() {
            return Err(PickError::ConfigValidation(
                "files.orders must not be empty".into(),
            ));
        }
        if self.files.labels.is_empty() {
            return Err(PickError::ConfigValidation(
                "files.labels must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// The literal label prefix for the configured depot. Valid configs
    /// always resolve; call after `validate`.
    pub fn label_prefix(&self) -> Result<&'static str, PickError> {
        depot_profile(&self.depot)
            .map(|d| d.label_prefix)
            .ok_or_else(|| PickError::UnknownDepot(self.depot.clone()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"
name = "Morning wave"
depot = "fbs_204514"

[files]
orders = "orders.csv"
labels = "labels.pdf"
"#;

    #[test]
    fn parse_valid_with_defaults() {
        let config = PickConfig::from_toml(VALID).unwrap();
        assert_eq!(config.name, "Morning wave");
        assert_eq!(config.depot, "fbs_204514");
        assert_eq!(config.columns.order_id, "Номер заказа");
        assert_eq!(config.columns.shipment_id, "Номер отправления");
        assert_eq!(config.output.numbering, NumberingMode::Continuous);
        assert!(config.output.picklist.is_none());
        assert_eq!(config.label_prefix().unwrap(), "FBS: 204514");
    }

    #[test]
    fn parse_explicit_columns_and_output() {
        let input = r#"
name = "Test"
depot = "fbs_309817"

[files]
orders = "o.csv"
labels = "l.pdf"

[columns]
order_id     = "order_id"
product_name = "product"
article      = "sku"
quantity     = "qty"
shipment_id  = "shipment"

[output]
numbering = "standalone"
picklist  = "picklist.csv"
"#;
        let config = PickConfig::from_toml(input).unwrap();
        assert_eq!(config.columns.article, "sku");
        assert_eq!(config.output.numbering, NumberingMode::Standalone);
        assert_eq!(config.output.picklist.as_deref(), Some("picklist.csv"));
        assert_eq!(config.label_prefix().unwrap(), "FBS: 309817");
    }

    #[test]
    fn reject_unknown_depot() {
        let input = VALID.replace("fbs_204514", "fbs_000000");
        let err = PickConfig::from_toml(&input).unwrap_err();
        assert!(err.to_string().contains("unknown depot"));
    }

    #[test]
    fn reject_empty_file_path() {
        let input = VALID.replace("orders.csv", "");
        let err = PickConfig::from_toml(&input).unwrap_err();
        assert!(err.to_string().contains("files.orders"));
    }

    #[test]
    fn reject_invalid_numbering() {
        let input = format!("{VALID}\n[output]\nnumbering = \"looping\"\n");
        assert!(PickConfig::from_toml(&input).is_err());
    }

    #[test]
    fn depot_registry_lookup() {
        assert!(depot_profile("rfbs_117205").is_some());
        assert!(depot_profile("unknown").is_none());
        assert_eq!(depots().len(), 3);
    }
}
