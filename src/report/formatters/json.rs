use crate::report::{AnalysisReport, ProductReport};

/// JSON formatter for reports
pub struct JsonFormatter;

impl JsonFormatter {
    /// Format the analysis as pretty-printed JSON
    pub fn format_analysis(report: &AnalysisReport) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(report)
    }

    pub fn format_product(report: &ProductReport) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{ProductRecord, RecordId};
    use crate::methods::supernutri::{self, SuperNutriWeights};
    use crate::methods::nutriscore;

    #[test]
    fn test_product_json_fields() {
        let product = ProductRecord {
            id: RecordId(3),
            name: "Perrier".to_string(),
            category: "Eau".to_string(),
            reference_label: Some("A".to_string()),
            organic_label: "NON".to_string(),
            ..Default::default()
        };
        let report = ProductReport {
            nutriscore: nutriscore::score_record(&product),
            electre: Vec::new(),
            supernutri: supernutri::score_record(&product, &SuperNutriWeights::default()),
            product,
        };

        let json = JsonFormatter::format_product(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["product"]["name"], "Perrier");
        assert_eq!(value["nutriscore"]["score"], -10);
        assert_eq!(value["nutriscore"]["label"], "A");
        assert_eq!(value["supernutri"]["record_id"], 3);
    }
}
