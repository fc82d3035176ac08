use crate::models::ModelDescriptor;

/// One entry of a model selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// Renders `models` as selector entries labelled `"<title> (<id>)"`.
///
/// Exactly one entry is selected when the list is non-empty: `selected` if
/// it names a listed model, otherwise the first `is_default` entry, otherwise
/// the first entry.
pub fn select_options(models: &[ModelDescriptor], selected: Option<&str>) -> Vec<SelectOption> {
    let chosen = selected
        .filter(|id| models.iter().any(|m| m.id == *id))
        .or_else(|| {
            models
                .iter()
                .find(|m| m.is_default)
                .or_else(|| models.first())
                .map(|m| m.id.as_str())
        });
    models
        .iter()
        .map(|m| SelectOption {
            value: m.id.clone(),
            label: format!("{} ({})", m.title, m.id),
            selected: chosen == Some(m.id.as_str()),
        })
        .collect()
}
