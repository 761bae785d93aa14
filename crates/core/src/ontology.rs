//! Ontology class form value shapes.
//!
//! Describes the data read and written by the class/classification editing
//! form: the base form fields plus the nested attribute tree (attributes hold
//! options, options hold further attributes). All shapes derive [`TS`] so the
//! matching TypeScript declarations are generated from these definitions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;
use crate::types::DbId;

/// Maximum length of a class, attribute, or option name.
pub const MAX_NAME_LENGTH: usize = 256;

// ---------------------------------------------------------------------------
// Enumerated tags
// ---------------------------------------------------------------------------

/// Which ontology tab the form is editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum ClassType {
    Class,
    Classification,
}

/// Drawing tool bound to an ontology class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum ToolType {
    Polygon,
    BoundingBox,
    Polyline,
    KeyPoint,
    Cuboid,
    Segmentation,
}

/// Kind of data a dataset holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum DatasetType {
    Image,
    LidarFusion,
    LidarBasic,
}

/// Input widget used for an attribute or classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum InputType {
    Radio,
    MultiSelection,
    Dropdown,
    Text,
}

/// All valid input type tags.
const VALID_INPUT_TYPES: &[&str] = &["RADIO", "MULTI_SELECTION", "DROPDOWN", "TEXT"];

impl InputType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Radio => "RADIO",
            Self::MultiSelection => "MULTI_SELECTION",
            Self::Dropdown => "DROPDOWN",
            Self::Text => "TEXT",
        }
    }

    /// Whether the widget offers a fixed list of options.
    pub fn has_options(&self) -> bool {
        !matches!(self, Self::Text)
    }
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RADIO" => Ok(Self::Radio),
            "MULTI_SELECTION" => Ok(Self::MultiSelection),
            "DROPDOWN" => Ok(Self::Dropdown),
            "TEXT" => Ok(Self::Text),
            _ => Err(CoreError::Validation(format!(
                "Invalid input type '{s}'. Must be one of: {}",
                VALID_INPUT_TYPES.join(", ")
            ))),
        }
    }
}

/// How image-class size constraints are expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum ImageConstraint {
    Size,
    Area,
}

/// Which nested list a form section edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum FormType {
    Options,
    Attributes,
}

// ---------------------------------------------------------------------------
// Attribute tree
// ---------------------------------------------------------------------------

/// One attribute of a class: a named input with selectable options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AttrItem {
    pub name: String,
    #[serde(rename = "type")]
    pub input_type: InputType,
    pub required: bool,
    pub options: Vec<OptionItem>,
}

/// One selectable option, which may carry nested attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OptionItem {
    pub name: String,
    pub attributes: Vec<AttrItem>,
}

impl AttrItem {
    /// Nesting depth of this attribute; a leaf attribute has depth 1.
    pub fn depth(&self) -> usize {
        1 + self
            .options
            .iter()
            .flat_map(|option| option.attributes.iter())
            .map(AttrItem::depth)
            .max()
            .unwrap_or(0)
    }
}

/// Validate a class, attribute, or option name.
pub fn validate_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation("Name must not be empty".to_string()));
    }
    let len = name.chars().count();
    if len > MAX_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "The length of name should be less than {MAX_NAME_LENGTH}, got {len}"
        )));
    }
    Ok(())
}

/// Validate every name in an attribute tree.
pub fn validate_attributes(attributes: &[AttrItem]) -> Result<(), CoreError> {
    for attr in attributes {
        validate_name(&attr.name)?;
        for option in &attr.options {
            validate_name(&option.name)?;
            validate_attributes(&option.attributes)?;
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Form values
// ---------------------------------------------------------------------------

/// Top-level fields of the class editing form.
///
/// Dimension constraint fields are free-form in the form (numbers, ranges,
/// or empty strings) and are carried as raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BaseForm {
    pub name: Option<String>,
    pub color: String,
    pub dataset_type: DatasetType,
    pub tool_type: ToolType,
    pub is_constraints: bool,
    pub is_constraints_for_image: bool,
    pub input_type: InputType,
    pub is_required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_standard: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<serde_json::Value>,
    pub image_limit: ImageConstraint,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_length: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_width: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_area: Option<serde_json::Value>,
}

impl BaseForm {
    pub fn validate(&self) -> Result<(), CoreError> {
        match &self.name {
            Some(name) => validate_name(name),
            None => Err(CoreError::Validation("Name must not be empty".to_string())),
        }
    }
}

/// Data carried into the form components alongside the form value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DataProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_schema: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_data_schema: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_tab: Option<ClassType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_list: Option<Vec<u32>>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub prop_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_value: Option<FormType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_center: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset_type: Option<DatasetType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset_id: Option<DbId>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
