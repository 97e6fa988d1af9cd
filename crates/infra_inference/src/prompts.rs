//! Prompts and response schemas for the chat backends

use serde_json::{json, Value};

use domain_claims::{ClaimRecord, Evidence, ProductContext};

pub const IMAGE_ANALYSIS_SYSTEM_PROMPT: &str = "\
You inspect product photos submitted with refund claims.

For the product described by the user:
1. List every visible defect: damage, wear, missing parts, manufacturing faults.
2. Rate the overall condition from 0 to 1, where 0 is perfect and 1 is severely damaged.
3. Check that every photo shows the described product and that the photos are clear enough to judge.
   If the photos are unclear, unrelated to each other or do not match the description,
   say so in the defect list and use a score of 0.

Be precise and consistent. Report only what the photos show.";

pub const REFUND_ESTIMATION_SYSTEM_PROMPT: &str = "\
You decide refunds for product claims from the evidence provided.

Evidence consists of the customer's review, a sentiment assessment of that review,
and a defect assessment of the product photos. Either assessment may be missing;
when it is, rely on the remaining evidence and say so in the notes.

Verify that the review, the product details and the defect findings describe the same product.
Propose a refund amount no greater than the product cost, justified by the evidence.
Never award a refund without evidence supporting it.

Reply with:
- refund_amount: the amount as a plain decimal number, without currency symbols
- refund_status: a short label such as Approved, Partially Approved or Rejected
- refund_reason: one sentence explaining the decision
- refund_notes: supporting detail from the evidence, or null";

/// Schema of the vision backend's reply
pub fn defect_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "detected_defects": {"type": "array", "items": {"type": "string"}},
            "defect_score": {"type": "number"}
        },
        "required": ["detected_defects", "defect_score"],
        "additionalProperties": false
    })
}

/// Schema of the estimation backend's reply
pub fn refund_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "refund_amount": {"type": "string"},
            "refund_status": {"type": "string"},
            "refund_reason": {"type": "string"},
            "refund_notes": {"type": ["string", "null"]}
        },
        "required": ["refund_amount", "refund_status", "refund_reason", "refund_notes"],
        "additionalProperties": false
    })
}

pub fn product_prompt(product: &ProductContext) -> String {
    format!(
        "Product information:\n- Product name: {}\n- Product description: {}\n\nExamine the following product photos.",
        product.name, product.description
    )
}

/// User message for the refund estimator
pub fn estimation_prompt(claim: &ClaimRecord, evidence: &Evidence) -> String {
    let mut prompt = String::from("Estimate the refund for this claim.\n\n");

    prompt.push_str(&format!("- Product ID: {}\n", claim.product_id));
    prompt.push_str(&format!("- Product name: {}\n", claim.product_name));
    prompt.push_str(&format!("- Product cost: {}\n", claim.product_cost));
    if let Some(name) = &claim.customer_name {
        prompt.push_str(&format!("- Customer: {}\n", name));
    }
    prompt.push_str(&format!("- Order date: {}\n", claim.order_date));
    prompt.push_str(&format!("- Claim date: {}\n\n", claim.claim_date));

    prompt.push_str(&format!("- Customer review: {}\n", claim.product_review));
    match &evidence.sentiment {
        Ok(sentiment) => {
            prompt.push_str(&format!("- Sentiment score: {:.2}\n", sentiment.score));
            prompt.push_str(&format!("- Sentiment: {}\n", sentiment.label));
        }
        Err(e) => prompt.push_str(&format!("- Sentiment: unavailable ({})\n", e)),
    }
    prompt.push('\n');

    match &evidence.defect {
        Ok(defect) if defect.detected_defects.is_empty() => {
            prompt.push_str("- Defects detected: none\n");
            prompt.push_str(&format!("- Defect score: {:.2}\n", defect.defect_score));
        }
        Ok(defect) => {
            prompt.push_str(&format!("- Defects detected: {}\n", defect.detected_defects.join("; ")));
            prompt.push_str(&format!("- Defect score: {:.2}\n", defect.defect_score));
        }
        Err(e) => prompt.push_str(&format!("- Defects: unavailable ({})\n", e)),
    }

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_claims::{ExtractorError, ExtractorFailure, ExtractorKind, SentimentResult, DefectResult};

    fn claim() -> ClaimRecord {
        ClaimRecord::open(domain_claims::ClaimSubmission {
            customer_id: Some("12345".into()),
            customer_name: Some("Ada".into()),
            order_id: Some("67890".into()),
            order_date: Some("2022-01-01".into()),
            claim_date: Some("2022-03-31".into()),
            product_id: Some("P123".into()),
            product_name: Some("Panda Stuffed Animal".into()),
            product_description: Some("A cute stuffed animal".into()),
            product_cost: Some(serde_json::json!("50.00")),
            product_review: Some("Torn seam".into()),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_estimation_prompt_lists_evidence() {
        let evidence = Evidence {
            sentiment: Ok(SentimentResult {
                score: 0.914,
                label: "negative".into(),
                detail: String::new(),
            }),
            defect: Ok(DefectResult {
                detected_defects: vec!["torn seam".into(), "loose stuffing".into()],
                defect_score: 0.6,
            }),
        };
        let prompt = estimation_prompt(&claim(), &evidence);

        assert!(prompt.contains("- Product ID: P123"));
        assert!(prompt.contains("- Product cost: $50.00"));
        assert!(prompt.contains("- Customer: Ada"));
        assert!(prompt.contains("- Sentiment score: 0.91"));
        assert!(prompt.contains("- Defects detected: torn seam; loose stuffing"));
        assert!(prompt.contains("- Defect score: 0.60"));
    }

    #[test]
    fn test_estimation_prompt_reports_missing_evidence() {
        let evidence = Evidence {
            sentiment: Err(ExtractorError::new(
                ExtractorKind::Sentiment,
                ExtractorFailure::Unavailable,
                "timed out",
            )),
            defect: Ok(DefectResult::no_visual_evidence()),
        };
        let prompt = estimation_prompt(&claim(), &evidence);

        assert!(prompt.contains("- Sentiment: unavailable (sentiment extractor failed (backend unavailable): timed out)"));
        assert!(prompt.contains("- Defects detected: none"));
    }

    #[test]
    fn test_refund_schema_requires_all_fields() {
        let schema = refund_schema();
        assert_eq!(schema["required"].as_array().unwrap().len(), 4);
    }
}
