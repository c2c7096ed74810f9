use crate::config::FrontmatterConfig;
use serde_yaml::Value;
use tracing::warn;

/// Fields pulled out of a diary's frontmatter block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontmatter {
    pub gym_menu_list: Vec<String>,
    /// `YYYY-MM-DD HH:MM`, or empty when absent.
    pub created_at: String,
}

/// Parse a frontmatter block as YAML and extract the workout menu and the
/// created timestamp.
///
/// Never fails: text that is not a YAML mapping is logged and yields
/// `Frontmatter::default()`.
pub fn parse_frontmatter(text: &str, config: &FrontmatterConfig) -> Frontmatter {
    let document: Value = match serde_yaml::from_str(text) {
        Ok(value) => value,
        Err(e) => {
            warn!("Error parsing frontmatter: {}", e);
            return Frontmatter::default();
        }
    };

    if !document.is_mapping() {
        warn!("Error parsing frontmatter: document is not a key-value mapping");
        return Frontmatter::default();
    }

    let gym_menu_list = match document.get(config.workout_menu_key.as_str()) {
        Some(Value::Sequence(items)) => items.iter().filter_map(scalar_to_string).collect(),
        Some(other) => scalar_to_string(other).into_iter().collect(),
        None => Vec::new(),
    };

    let created_at = document
        .get(config.created_at_key.as_str())
        .and_then(scalar_to_string)
        .unwrap_or_default();

    Frontmatter {
        gym_menu_list,
        created_at,
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => serde_yaml::to_string(value)
            .ok()
            .map(|s| s.trim_end().to_string()),
    }
}
