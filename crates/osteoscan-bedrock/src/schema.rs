use serde_json::{json, Map, Value};

use osteoscan_core::models::analysis::{DxaRecommendation, RiskCategory};
use osteoscan_scoring::MeasureField;
use osteoscan_scoring::applicability::REGIONAL_FIELDS;
use osteoscan_scoring::measures::ALWAYS_REQUIRED;

fn number_property(field: MeasureField, nullable: bool) -> Value {
    let mut property = Map::new();
    property.insert(
        "type".to_string(),
        if nullable { json!(["number", "null"]) } else { json!("number") },
    );
    if let Some(bound) = field.bound() {
        property.insert("minimum".to_string(), json!(bound.min));
        property.insert("maximum".to_string(), json!(bound.max));
    }
    Value::Object(property)
}

/// JSON Schema of the findings object the model must return. Numeric
/// bounds are the validator's own, so a conforming response never fails a
/// bounds check.
pub fn response_schema() -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for field in REGIONAL_FIELDS {
        properties.insert(field.as_str().to_string(), number_property(field, true));
        required.push(field.as_str());
    }
    for field in ALWAYS_REQUIRED {
        properties.insert(field.as_str().to_string(), number_property(field, false));
        required.push(field.as_str());
    }

    properties.insert(
        "osteoporosis_risk_category".to_string(),
        json!({
            "type": "string",
            "enum": RiskCategory::ALL.iter().map(|c| c.as_str()).collect::<Vec<_>>(),
        }),
    );
    required.push("osteoporosis_risk_category");
    properties.insert(
        "dxa_recommendation".to_string(),
        json!({
            "type": "string",
            "enum": DxaRecommendation::ALL.iter().map(|r| r.as_str()).collect::<Vec<_>>(),
        }),
    );
    properties.insert("texture_analysis_method".to_string(), json!({ "type": "string" }));
    properties.insert("preprocessing_applied".to_string(), json!({ "type": "string" }));

    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}
