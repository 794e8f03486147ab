//! Structured contract records returned by the AI extraction service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Location of a claim inside the source document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceRef {
    pub page: u32,
    pub paragraph: u32,
    pub text: String,
}

/// General contract facts
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractInfo {
    /// Category tag (`purchase`, `lease`, `loan`, `employment`, `service`,
    /// `other`, or whatever the service reports)
    pub contract_type: String,
    pub contract_number: String,
    pub signing_date: String,
    pub effective_date: String,
    pub expiry_date: String,
    pub signing_location: String,
    pub contract_status: String,
    pub confidence: f64,
    pub source_references: Vec<SourceRef>,
}

/// One contracting party
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PartyInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub party_type: String,
    pub legal_representative: String,
    pub id_number: String,
    pub address: String,
    pub contact: String,
    pub bank_name: String,
    pub bank_account: String,
    pub confidence: f64,
    pub source_references: Vec<SourceRef>,
}

/// Financial terms
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialInfo {
    pub transaction_amount: String,
    pub currency: String,
    pub payment_method: String,
    pub payment_schedule: String,
    pub tax_info: String,
    pub confidence: f64,
    pub source_references: Vec<SourceRef>,
}

/// Validity and termination terms
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidityInfo {
    pub effective_condition: String,
    pub termination_condition: String,
    pub contract_status: String,
    pub termination_date: String,
    pub confidence: f64,
    pub source_references: Vec<SourceRef>,
}

/// Obligations and rights of both parties
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RightsObligations {
    pub party_a_obligations: Vec<String>,
    pub party_b_obligations: Vec<String>,
    pub party_a_rights: Vec<String>,
    pub party_b_rights: Vec<String>,
    pub performance_period: String,
    pub performance_location: String,
    pub confidence: f64,
    pub source_references: Vec<SourceRef>,
}

/// Breach and liability terms
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BreachLiability {
    pub breach_scenarios: Vec<String>,
    pub liquidated_damages: String,
    pub compensation_limit: String,
    pub exemption_clauses: Vec<String>,
    pub force_majeure_clause: String,
    pub confidence: f64,
    pub source_references: Vec<SourceRef>,
}

/// Dispute resolution terms
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DisputeResolution {
    pub resolution_method: String,
    pub jurisdiction_court: String,
    pub arbitration_org: String,
    pub arbitration_location: String,
    pub governing_law: String,
    pub confidence: f64,
    pub source_references: Vec<SourceRef>,
}

/// Confidentiality and intellectual-property terms
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidentialityIp {
    pub confidentiality_clause: String,
    pub confidentiality_period: String,
    pub ip_ownership: String,
    pub confidence: f64,
    pub source_references: Vec<SourceRef>,
}

/// Miscellaneous terms
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OtherTerms {
    pub modification_clause: String,
    pub assignment_clause: String,
    pub termination_procedure: String,
    pub notice_clause: String,
    pub contract_copies: String,
    pub attachments: Vec<String>,
    pub confidence: f64,
    pub source_references: Vec<SourceRef>,
}

/// Signature block
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SignatureInfo {
    pub party_a_signatory: String,
    pub party_a_sign_date: String,
    pub party_a_seal: bool,
    pub party_b_signatory: String,
    pub party_b_sign_date: String,
    pub party_b_seal: bool,
    pub witness_name: String,
    pub witness_contact: String,
    pub confidence: f64,
    pub source_references: Vec<SourceRef>,
}

/// Category-specific extension records; at most one is populated, selected
/// by `ContractInfo::contract_type`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeSpecificFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employment_fields: Option<EmploymentFields>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lease_fields: Option<LeaseFields>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan_fields: Option<LoanFields>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_fields: Option<ServiceFields>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_fields: Option<PurchaseFields>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EmploymentFields {
    pub position: String,
    pub work_location: String,
    pub work_hours: String,
    pub probation_period: String,
    pub salary: String,
    pub social_insurance: String,
    pub non_compete_clause: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaseFields {
    pub leased_property: String,
    pub lease_area: String,
    pub lease_purpose: String,
    pub rent_amount: String,
    pub rent_payment_cycle: String,
    pub deposit: String,
    #[serde(rename = "maintenance_responsibility")]
    pub maintenance_resp: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoanFields {
    pub loan_amount: String,
    pub loan_purpose: String,
    pub loan_term: String,
    pub interest_rate: String,
    pub repayment_method: String,
    pub collateral: String,
    pub guarantor: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceFields {
    pub service_content: String,
    pub service_standard: String,
    pub service_period: String,
    pub service_fee: String,
    pub acceptance_criteria: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PurchaseFields {
    pub goods_name: String,
    pub goods_spec: String,
    pub goods_quantity: String,
    pub goods_price: String,
    pub delivery_location: String,
    pub delivery_date: String,
    pub quality_standard: String,
    pub warranty_period: String,
    pub confidence: f64,
}

/// Raw structured record returned by one extraction call
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AiExtraction {
    pub contract_info: ContractInfo,
    pub party_a: PartyInfo,
    pub party_b: PartyInfo,
    pub financial: FinancialInfo,
    pub validity: ValidityInfo,
    pub rights_obligations: RightsObligations,
    pub breach_liability: BreachLiability,
    pub dispute_resolution: DisputeResolution,
    pub confidentiality_ip: ConfidentialityIp,
    pub other_terms: OtherTerms,
    pub signature: SignatureInfo,
    pub type_specific: TypeSpecificFields,
    pub ocr_required: bool,
}

impl AiExtraction {
    /// Confidence scores of the eleven scored sections, in a fixed order.
    pub fn section_confidences(&self) -> [f64; 11] {
        [
            self.contract_info.confidence,
            self.party_a.confidence,
            self.party_b.confidence,
            self.financial.confidence,
            self.validity.confidence,
            self.rights_obligations.confidence,
            self.breach_liability.confidence,
            self.dispute_resolution.confidence,
            self.confidentiality_ip.confidence,
            self.other_terms.confidence,
            self.signature.confidence,
        ]
    }
}

/// Processing metadata attached to every result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultMetadata {
    /// Source file name as submitted
    pub source_file: String,
    pub page_count: usize,
    pub extracted_at: DateTime<Utc>,
    /// Wall-clock processing time for this file, in seconds
    pub duration_secs: f64,
    /// Mean of the positive section confidences (0.8 when none is positive)
    pub overall_confidence: f64,
    /// An OCR call was made for this file
    pub ocr_used: bool,
}

/// Structured contract-field record for one successfully processed file.
///
/// Created once, immutable afterwards, owned by the task that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub id: Uuid,
    pub file_name: String,
    pub contract_info: ContractInfo,
    pub party_a: PartyInfo,
    pub party_b: PartyInfo,
    pub financial: FinancialInfo,
    pub validity: ValidityInfo,
    pub rights_obligations: RightsObligations,
    pub breach_liability: BreachLiability,
    pub dispute_resolution: DisputeResolution,
    pub confidentiality_ip: ConfidentialityIp,
    pub other_terms: OtherTerms,
    pub signature: SignatureInfo,
    pub type_specific: TypeSpecificFields,
    pub metadata: ResultMetadata,
}
