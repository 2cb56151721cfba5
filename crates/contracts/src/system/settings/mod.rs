use serde::{Deserialize, Deserializer, Serialize};

pub mod maintenance;

pub use maintenance::{MaintenanceAlert, MaintenanceState, MaintenanceWatch};

/// Settings key holding the site-wide maintenance flag
pub const MAINTENANCE_MODE_KEY: &str = "site.maintenance_mode";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingType {
    Text,
    Html,
    Float,
    Bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Setting {
    pub key: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub value: String,
    #[serde(rename = "type")]
    pub setting_type: SettingType,
    #[serde(default)]
    pub is_setting: Option<bool>,
}

/// `"value": null` reads as an empty string
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// A setting value interpreted per its type tag
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    Text(String),
    Html(String),
    Float(f64),
    Bool(bool),
    /// Raw value that does not parse as its declared type
    Invalid(String),
}

impl Setting {
    pub fn typed_value(&self) -> SettingValue {
        match self.setting_type {
            SettingType::Text => SettingValue::Text(self.value.clone()),
            SettingType::Html => SettingValue::Html(self.value.clone()),
            SettingType::Float => self
                .value
                .trim()
                .parse::<f64>()
                .map(SettingValue::Float)
                .unwrap_or_else(|_| SettingValue::Invalid(self.value.clone())),
            SettingType::Bool => parse_bool(&self.value)
                .map(SettingValue::Bool)
                .unwrap_or_else(|| SettingValue::Invalid(self.value.clone())),
        }
    }

    /// First dotted segment: `site.maintenance_mode` → `site`
    pub fn namespace(&self) -> &str {
        self.key.split('.').next().unwrap_or(&self.key)
    }
}

pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" | "" => Some(false),
        _ => None,
    }
}

/// Wire value for a bool setting
pub fn bool_value(flag: bool) -> String {
    if flag { "1" } else { "0" }.to_string()
}

/// The maintenance flag, if the key is present and parses as a bool
pub fn maintenance_flag(settings: &[Setting]) -> Option<bool> {
    settings
        .iter()
        .find(|s| s.key == MAINTENANCE_MODE_KEY)
        .and_then(|s| parse_bool(&s.value))
}

/// `PUT /settings/{key}` body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateSettingDto {
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn setting(key: &str, value: &str, setting_type: SettingType) -> Setting {
        Setting {
            key: key.to_string(),
            value: value.to_string(),
            setting_type,
            is_setting: Some(true),
        }
    }

    #[test]
    fn test_typed_values() {
        assert_eq!(
            setting("shop.tax", " 15.5 ", SettingType::Float).typed_value(),
            SettingValue::Float(15.5)
        );
        assert_eq!(
            setting("shop.tax", "abc", SettingType::Float).typed_value(),
            SettingValue::Invalid("abc".to_string())
        );
        assert_eq!(
            setting("site.open", "ON", SettingType::Bool).typed_value(),
            SettingValue::Bool(true)
        );
        assert_eq!(
            setting("site.open", "maybe", SettingType::Bool).typed_value(),
            SettingValue::Invalid("maybe".to_string())
        );
        assert_eq!(
            setting("site.footer", "<b>x</b>", SettingType::Html).typed_value(),
            SettingValue::Html("<b>x</b>".to_string())
        );
    }

    #[test]
    fn test_maintenance_flag() {
        let mut list = vec![
            setting("site.name", "Store", SettingType::Text),
            setting(MAINTENANCE_MODE_KEY, "1", SettingType::Bool),
        ];
        assert_eq!(maintenance_flag(&list), Some(true));
        list[1].value = "0".to_string();
        assert_eq!(maintenance_flag(&list), Some(false));
        list.pop();
        assert_eq!(maintenance_flag(&list), None);
    }

    #[test]
    fn test_wire_shape() {
        let s: Setting = serde_json::from_value(json!({
            "key": "site.maintenance_mode",
            "value": "1",
            "type": "bool",
            "is_setting": null
        }))
        .unwrap();
        assert_eq!(s.setting_type, SettingType::Bool);
        assert_eq!(s.is_setting, None);
        assert_eq!(s.namespace(), "site");
        assert_eq!(bool_value(true), "1");
    }

    #[test]
    fn test_null_value_reads_as_empty() {
        let page: crate::shared::api::Page<Setting> = serde_json::from_value(json!({
            "data": [
                { "key": "seo.description", "value": null, "type": "text" },
                { "key": "site.maintenance_mode", "value": "1", "type": "bool" },
                { "key": "seo.title", "type": "text" }
            ],
            "current_page": 1,
            "last_page": 1
        }))
        .unwrap();
        assert_eq!(page.data[0].value, "");
        assert_eq!(page.data[2].value, "");
        assert_eq!(maintenance_flag(&page.data), Some(true));
    }
}
