//! Claim schema
//!
//! The canonical shape of a First Notice of Loss once its fields have been
//! pulled out of the submitted document. Every field is optional because
//! the extraction model may omit anything; completeness is judged later by
//! the [`FieldValidator`](crate::validation::FieldValidator).
//!
//! Untyped extraction output enters the domain through exactly one door,
//! [`Claim::coerce`].

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::MalformedClaimError;
use crate::schema::FieldPath;

/// Policy information fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyInformation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policyholder_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_dates: Option<String>,
}

/// Incident information fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentInformation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Parties involved in the loss
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvolvedParties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claimant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub third_parties: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_details: Option<String>,
}

/// Damaged asset details
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<String>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub estimated_damage: Option<Decimal>,
}

/// A claim as extracted from an FNOL document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_information: Option<PolicyInformation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incident_information: Option<IncidentInformation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub involved_parties: Option<InvolvedParties>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_details: Option<AssetDetails>,
    /// Free-form category, e.g. "auto" or "injury"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claim_type: Option<String>,
    /// Attachment filenames
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<String>>,
    /// Not used for routing
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub initial_estimate: Option<Decimal>,
}

/// A resolved leaf value of a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Amount(Decimal),
    List(&'a [String]),
}

impl<'a> FieldValue<'a> {
    fn text(value: &'a Option<String>) -> Option<Self> {
        value.as_deref().map(FieldValue::Text)
    }

    fn amount(value: &Option<Decimal>) -> Option<Self> {
        value.map(FieldValue::Amount)
    }

    fn list(value: &'a Option<Vec<String>>) -> Option<Self> {
        value.as_deref().map(FieldValue::List)
    }
}

impl Claim {
    /// Every leaf path a claim can carry, in schema order
    pub const FIELD_PATHS: [&'static str; 16] = [
        "policy_information.policy_number",
        "policy_information.policyholder_name",
        "policy_information.effective_dates",
        "incident_information.date",
        "incident_information.time",
        "incident_information.location",
        "incident_information.description",
        "involved_parties.claimant",
        "involved_parties.third_parties",
        "involved_parties.contact_details",
        "asset_details.asset_type",
        "asset_details.asset_id",
        "asset_details.estimated_damage",
        "claim_type",
        "attachments",
        "initial_estimate",
    ];

    /// Returns true if `dotted` names a leaf field of the claim
    pub fn is_leaf_path(dotted: &str) -> bool {
        Self::FIELD_PATHS.contains(&dotted)
    }

    /// Converts untyped extraction output into a claim
    ///
    /// Groups may be objects or `null`. String fields accept strings and
    /// numbers, amounts accept numbers and numeric strings, lists accept
    /// arrays of strings. Unknown keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns `MalformedClaimError` naming the first path whose value has
    /// the wrong shape.
    pub fn coerce(value: Value) -> Result<Claim, MalformedClaimError> {
        let root = match &value {
            Value::Object(map) => map,
            other => return Err(MalformedClaimError::new(ROOT, "a JSON object", other)),
        };

        let policy_information = group(root, "policy_information")?
            .map(|g| -> Result<_, MalformedClaimError> {
                Ok(PolicyInformation {
                    policy_number: text(g, "policy_information", "policy_number")?,
                    policyholder_name: text(g, "policy_information", "policyholder_name")?,
                    effective_dates: text(g, "policy_information", "effective_dates")?,
                })
            })
            .transpose()?;

        let incident_information = group(root, "incident_information")?
            .map(|g| -> Result<_, MalformedClaimError> {
                Ok(IncidentInformation {
                    date: text(g, "incident_information", "date")?,
                    time: text(g, "incident_information", "time")?,
                    location: text(g, "incident_information", "location")?,
                    description: text(g, "incident_information", "description")?,
                })
            })
            .transpose()?;

        let involved_parties = group(root, "involved_parties")?
            .map(|g| -> Result<_, MalformedClaimError> {
                Ok(InvolvedParties {
                    claimant: text(g, "involved_parties", "claimant")?,
                    third_parties: text_list(g, "involved_parties", "third_parties")?,
                    contact_details: text(g, "involved_parties", "contact_details")?,
                })
            })
            .transpose()?;

        let asset_details = group(root, "asset_details")?
            .map(|g| -> Result<_, MalformedClaimError> {
                Ok(AssetDetails {
                    asset_type: text(g, "asset_details", "asset_type")?,
                    asset_id: text(g, "asset_details", "asset_id")?,
                    estimated_damage: amount(g, "asset_details", "estimated_damage")?,
                })
            })
            .transpose()?;

        Ok(Claim {
            policy_information,
            incident_information,
            involved_parties,
            asset_details,
            claim_type: text(root, "", "claim_type")?,
            attachments: text_list(root, "", "attachments")?,
            initial_estimate: amount(root, "", "initial_estimate")?,
        })
    }

    /// Walks a dotted path down to its leaf value
    ///
    /// Returns `None` when any segment along the way is absent.
    pub fn field(&self, path: &FieldPath) -> Option<FieldValue<'_>> {
        match path.segments() {
            [name] => match name.as_str() {
                "claim_type" => FieldValue::text(&self.claim_type),
                "attachments" => FieldValue::list(&self.attachments),
                "initial_estimate" => FieldValue::amount(&self.initial_estimate),
                _ => None,
            },
            [group, name] => match group.as_str() {
                "policy_information" => self.policy_information.as_ref()?.field(name),
                "incident_information" => self.incident_information.as_ref()?.field(name),
                "involved_parties" => self.involved_parties.as_ref()?.field(name),
                "asset_details" => self.asset_details.as_ref()?.field(name),
                _ => None,
            },
            _ => None,
        }
    }

    /// Estimated damage, if the asset group carries one
    pub fn estimated_damage(&self) -> Option<Decimal> {
        self.asset_details.as_ref()?.estimated_damage
    }

    /// Incident description, if present
    pub fn description(&self) -> Option<&str> {
        self.incident_information.as_ref()?.description.as_deref()
    }

    /// Policy number, if present
    pub fn policy_number(&self) -> Option<&str> {
        self.policy_information.as_ref()?.policy_number.as_deref()
    }

    /// Incident date, if present
    pub fn incident_date(&self) -> Option<&str> {
        self.incident_information.as_ref()?.date.as_deref()
    }
}

impl PolicyInformation {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "policy_number" => FieldValue::text(&self.policy_number),
            "policyholder_name" => FieldValue::text(&self.policyholder_name),
            "effective_dates" => FieldValue::text(&self.effective_dates),
            _ => None,
        }
    }
}

impl IncidentInformation {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "date" => FieldValue::text(&self.date),
            "time" => FieldValue::text(&self.time),
            "location" => FieldValue::text(&self.location),
            "description" => FieldValue::text(&self.description),
            _ => None,
        }
    }
}

impl InvolvedParties {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "claimant" => FieldValue::text(&self.claimant),
            "third_parties" => FieldValue::list(&self.third_parties),
            "contact_details" => FieldValue::text(&self.contact_details),
            _ => None,
        }
    }
}

impl AssetDetails {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "asset_type" => FieldValue::text(&self.asset_type),
            "asset_id" => FieldValue::text(&self.asset_id),
            "estimated_damage" => FieldValue::amount(&self.estimated_damage),
            _ => None,
        }
    }
}

const ROOT: &str = "<root>";

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

fn group<'a>(root: &'a Map<String, Value>, key: &str) -> Result<Option<&'a Map<String, Value>>, MalformedClaimError> {
    match root.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(map)) => Ok(Some(map)),
        Some(other) => Err(MalformedClaimError::new(key, "an object", other)),
    }
}

fn text(map: &Map<String, Value>, prefix: &str, key: &str) -> Result<Option<String>, MalformedClaimError> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        // Policy numbers and similar identifiers sometimes come back bare
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(MalformedClaimError::new(join(prefix, key), "a string", other)),
    }
}

fn amount(map: &Map<String, Value>, prefix: &str, key: &str) -> Result<Option<Decimal>, MalformedClaimError> {
    let value = match map.get(key) {
        None | Some(Value::Null) => return Ok(None),
        Some(value) => value,
    };
    let raw = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        other => return Err(MalformedClaimError::new(join(prefix, key), "a number", other)),
    };

    // Out-of-range numbers keep their JSON kind in the report
    Decimal::from_str(&raw)
        .or_else(|_| Decimal::from_scientific(&raw))
        .map(Some)
        .map_err(|_| MalformedClaimError::new(join(prefix, key), "a number", value))
}

fn text_list(map: &Map<String, Value>, prefix: &str, key: &str) -> Result<Option<Vec<String>>, MalformedClaimError> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::String(s) => Ok(s.clone()),
                other => Err(MalformedClaimError::new(
                    format!("{}[{}]", join(prefix, key), index),
                    "a string",
                    other,
                )),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some),
        Some(other) => Err(MalformedClaimError::new(join(prefix, key), "a list of strings", other)),
    }
}
