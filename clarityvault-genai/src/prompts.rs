/// Prompt templates
///
/// Every prompt the service sends is produced here from a closed set of
/// templates. User-supplied values enter only through [`Language`] and
/// [`DocumentType`], which are validated on construction, and through the
/// free text being translated or analyzed. Request bodies are serialized
/// with serde downstream, so none of these strings need escaping.

use std::fmt;

const MAX_LANGUAGE_LEN: usize = 64;
const MAX_DOCUMENT_TYPE_LEN: usize = 128;

/// Texts shorter than this (in characters) get the short explanation template
pub const SHORT_TEXT_THRESHOLD: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PromptError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("{field} must not contain control characters")]
    ControlCharacters { field: &'static str },
}

fn validate(raw: &str, field: &'static str, max: usize) -> Result<String, PromptError> {
    let value = raw.trim();

    if value.is_empty() {
        return Err(PromptError::Empty { field });
    }
    if value.chars().count() > max {
        return Err(PromptError::TooLong { field, max });
    }
    if value.chars().any(char::is_control) {
        return Err(PromptError::ControlCharacters { field });
    }

    Ok(value.to_string())
}

/// Target language as typed by the user, e.g. `Hindi` or `fr`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language(String);

impl Language {
    pub fn parse(raw: &str) -> Result<Self, PromptError> {
        validate(raw, "language", MAX_LANGUAGE_LEN).map(Self)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Free-form document or section type, e.g. `Loan Agreement` or `definition`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentType(String);

impl DocumentType {
    pub fn parse(raw: &str) -> Result<Self, PromptError> {
        validate(raw, "documentType", MAX_DOCUMENT_TYPE_LEN).map(Self)
    }

    /// True when the caller asked for an explanation rather than an analysis
    fn asks_for_explanation(&self) -> bool {
        let lowered = self.0.to_lowercase();
        ["meaning", "definition", "explain"]
            .iter()
            .any(|keyword| lowered.contains(keyword))
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Prompts that run against an uploaded PDF
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PdfTask {
    Translate(Language),
    ExtractJargon(Language),
    IdentifyDocumentType,
    HarmfulTerms,
    ContractAlternatives,
    LoanAnalysis,
}

impl PdfTask {
    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            PdfTask::Translate(_) => "pdf_translation",
            PdfTask::ExtractJargon(_) => "jargon_extraction",
            PdfTask::IdentifyDocumentType => "document_type",
            PdfTask::HarmfulTerms => "harmful_terms",
            PdfTask::ContractAlternatives => "contract_alternatives",
            PdfTask::LoanAnalysis => "loan_analysis",
        }
    }

    /// Prefix put in front of provider errors for this task
    pub fn error_prefix(&self) -> &'static str {
        match self {
            PdfTask::Translate(_) | PdfTask::IdentifyDocumentType => "Error processing PDF: ",
            PdfTask::ExtractJargon(_) => "Error extracting jargon from PDF: ",
            PdfTask::HarmfulTerms => "Error analyzing harmful terms in PDF: ",
            PdfTask::ContractAlternatives => "Error analyzing contract and finding alternatives: ",
            PdfTask::LoanAnalysis => "Error analyzing loan document: ",
        }
    }

    pub fn prompt(&self) -> String {
        match self {
            PdfTask::Translate(language) => format!(
                "Please convert the content of this PDF document to {language}. \
                 Maintain the original structure and formatting as much as possible. \
                 Provide a clear and accurate translation of all text content."
            ),
            PdfTask::ExtractJargon(language) => jargon_prompt(language),
            PdfTask::IdentifyDocumentType => DOCUMENT_TYPE_PROMPT.to_string(),
            PdfTask::HarmfulTerms => HARMFUL_TERMS_PROMPT.to_string(),
            PdfTask::ContractAlternatives => CONTRACT_ALTERNATIVES_PROMPT.to_string(),
            PdfTask::LoanAnalysis => LOAN_ANALYSIS_PROMPT.to_string(),
        }
    }
}

/// Prompt for translating free text
pub fn translation_prompt(text: &str, language: &Language) -> String {
    format!(
        " {text}\ngiven the text above translate the given text in given{language} \
         and maintain the original structure and formatting as much as possible. and dont give extra text"
    )
}

/// The two shapes of free-text analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisTemplate {
    /// Short "what does this mean" explanation
    Explain,
    /// Sectioned analysis of a whole document
    Comprehensive,
}

impl AnalysisTemplate {
    pub fn select(text: &str, document_type: &DocumentType) -> Self {
        if document_type.asks_for_explanation() || text.chars().count() < SHORT_TEXT_THRESHOLD {
            AnalysisTemplate::Explain
        } else {
            AnalysisTemplate::Comprehensive
        }
    }

    pub fn render(&self, text: &str, language: &Language, document_type: &DocumentType) -> String {
        match self {
            AnalysisTemplate::Explain => explain_prompt(text, language, document_type),
            AnalysisTemplate::Comprehensive => comprehensive_prompt(text, language, document_type),
        }
    }
}

fn jargon_prompt(language: &Language) -> String {
    format!(
        "Analyze this PDF document to identify and summarize its most important sections and key clauses. \
Your goal is to make a complex document easy to navigate and understand.\n\n\
For each critical section you identify, provide the output in the following exact format:\n\n\
SECTION: [The name or title of the key section, e.g., 'Limitation of Liability']\n\
PAGE: [The exact page number where the section begins]\n\
SUMMARY: [A brief, easy-to-understand summary of what this section means and its implications, written in {language}]\n\
---\n\n\
Please focus on locating and explaining sections related to:\n\
- Core obligations and responsibilities of the parties\n\
- Financial elements like payment terms, fees, and penalties\n\
- Legal and liability clauses (Indemnification, Limitation of Liability, Governing Law)\n\
- The duration of the agreement (Term and Termination)\n\
- Confidentiality and data protection\n\
- Dispute resolution processes\n\n\
Provide summaries in {language} and ensure they are clear and concise for a general audience."
    )
}

fn explain_prompt(text: &str, language: &Language, document_type: &DocumentType) -> String {
    format!(
        "Explain the meaning and significance of the following text in {language}:\n\n\
Text: {text}\n\n\
Document/Section Type: {document_type}\n\n\
Please provide:\n\
1. MEANING: Clear explanation of what this text means\n\
2. KEY TERMS: Definition of any technical, legal, or specialized terms\n\
3. CONTEXT: Why this is important in the context of {document_type}\n\
4. IMPLICATIONS: What this means for the parties involved\n\n\
Keep the explanation clear and concise in {language}."
    )
}

fn comprehensive_prompt(text: &str, language: &Language, document_type: &DocumentType) -> String {
    format!(
        "Analyze the following {document_type} document and provide a comprehensive analysis in {language}:\n\n\
Document Text: {text}\n\n\
Document Type: {document_type}\n\n\
Please provide analysis in the following format:\n\n\
DOCUMENT OVERVIEW:\n\
- Brief description of this {document_type} and its purpose\n\n\
KEY TERMS AND DEFINITIONS:\n\
- [List and explain any technical, financial, or legal terms specific to {document_type}]\n\n\
FINANCIAL CALCULATIONS (if applicable):\n\
- [For financial documents, perform relevant calculations such as:\n\
\x20 * Total amounts, interest calculations, payment schedules\n\
\x20 * Monthly/yearly costs, percentages, rates\n\
\x20 * Due dates, penalties, late fees]\n\n\
IMPORTANT CLAUSES AND OBLIGATIONS:\n\
- [Highlight key responsibilities, rights, and obligations of parties involved]\n\n\
CRITICAL DATES AND DEADLINES:\n\
- [Extract and list any important dates, deadlines, or time-sensitive information]\n\n\
RISKS AND CONCERNS:\n\
- [Identify potential risks, penalties, or areas of concern specific to {document_type}]\n\n\
ACTIONABLE ITEMS:\n\
- [What actions need to be taken based on this {document_type}]\n\n\
SUMMARY:\n\
- [Provide a concise summary of the document's purpose and main points]\n\n\
Please ensure all explanations are clear and in {language} language."
    )
}

const DOCUMENT_TYPE_PROMPT: &str = "Identify the type of this document (e.g., contract, invoice, report, etc.) whether \
it is a legal, financial, or technical document. give it in a single word or short phrase";

const HARMFUL_TERMS_PROMPT: &str = "Carefully analyze this PDF document to identify potentially harmful, unfair, or risky terms and conditions that could negatively impact the client or party agreeing to this document.\n\n\
For each potentially harmful term or condition you identify, provide the output in the following exact format:\n\n\
HARMFUL TERM: [Brief title of the problematic clause]\n\
PAGE: [Exact page number where this term appears]\n\
RISK LEVEL: [HIGH/MEDIUM/LOW]\n\
DESCRIPTION: [Detailed explanation of what this term means and why it's potentially harmful]\n\
POTENTIAL IMPACT: [How this could negatively affect the client/party]\n\
RECOMMENDATION: [What action should be taken - negotiate, reject, seek legal advice, etc.]\n\
---\n\n\
Focus specifically on identifying:\n\
• Unfair liability clauses that put excessive responsibility on one party\n\
• Hidden fees, penalties, or unexpected charges\n\
• Automatic renewal clauses without clear opt-out mechanisms\n\
• Broad termination rights favoring one party\n\
• Excessive limitation of liability for the service provider\n\
• Broad indemnification requirements\n\
• Unreasonable confidentiality or non-compete clauses\n\
• Vague or ambiguous language that could be interpreted unfavorably\n\
• Unfair dispute resolution mechanisms\n\
• Intellectual property clauses that transfer excessive rights\n\
• Data privacy concerns or broad data usage rights\n\
• Unreasonable performance standards or service level agreements\n\n\
If no harmful terms are found, state: 'NO HARMFUL TERMS IDENTIFIED - This document appears to have fair and balanced terms.'\n\n\
Provide clear, actionable advice for each identified risk.";

const CONTRACT_ALTERNATIVES_PROMPT: &str = "Perform a comprehensive analysis of this contract document and provide alternative contract recommendations based on your knowledge database.\n\n\
PHASE 1 - CONTRACT ANALYSIS:\n\
First, analyze this contract thoroughly and provide:\n\n\
CONTRACT TYPE: [Identify the specific type of contract - e.g., Service Agreement, Employment Contract, Lease Agreement, etc.]\n\
KEY TERMS SUMMARY:\n\
• Duration: [Contract term/duration]\n\
• Financial Terms: [Payment amounts, schedules, fees]\n\
• Main Obligations: [Key responsibilities of each party]\n\
• Termination Conditions: [How and when the contract can be terminated]\n\
• Risk Factors: [Identify any concerning clauses or terms]\n\n\
CONTRACT STRENGTHS:\n\
• [List 3-4 positive aspects of this contract]\n\n\
CONTRACT WEAKNESSES:\n\
• [List 3-4 areas where this contract could be improved]\n\n\
OVERALL RATING: [Rate this contract from 1-10 with brief justification]\n\n\
---\n\n\
PHASE 2 - ALTERNATIVE CONTRACT RECOMMENDATIONS:\n\
Based on the contract type identified, search your knowledge base and provide 4-5 alternative contract templates or approaches that could be better suited. For each alternative, provide:\n\n\
ALTERNATIVE 1: [Name/Type of alternative contract]\n\
DESCRIPTION: [Brief description of this alternative approach]\n\
ADVANTAGES OVER CURRENT CONTRACT:\n\
• [Specific benefits compared to the analyzed contract]\n\
• [How it addresses weaknesses in the current contract]\n\
POTENTIAL DRAWBACKS:\n\
• [Any limitations or downsides of this alternative]\n\
BEST FOR: [What situations or parties this alternative works best for]\n\
RECOMMENDATION SCORE: [Rate 1-10 how much better this is than current contract]\n\n\
[Repeat this format for ALTERNATIVE 2, 3, 4, and 5]\n\n\
---\n\n\
PHASE 3 - FINAL RECOMMENDATIONS:\n\
SHOULD CLIENT KEEP CURRENT CONTRACT?: [Yes/No with detailed reasoning]\n\n\
TOP RECOMMENDED ALTERNATIVE: [Which alternative is best and why]\n\n\
ACTION PLAN:\n\
• [Immediate steps the client should take]\n\
• [Long-term contract strategy recommendations]\n\
• [What to negotiate if staying with current contract]\n\n\
RISK MITIGATION:\n\
• [How to reduce risks in current contract]\n\
• [How alternatives better protect the client]\n\n\
Note: Base your alternative recommendations on widely available contract templates, industry standards, and best practices from your training data. Focus on practical, implementable alternatives that address the specific weaknesses identified in the client's current contract.";

const LOAN_ANALYSIS_PROMPT: &str = "Perform a comprehensive financial analysis of this loan document and provide detailed EMI calculations and payment breakdown.\n\n\
PHASE 1 - LOAN DOCUMENT ANALYSIS:\n\
Extract and analyze the following key information from the loan document:\n\n\
LOAN BASIC DETAILS:\n\
• Loan Type: [Personal Loan/Home Loan/Car Loan/Business Loan/etc.]\n\
• Principal Amount: [Total loan amount sanctioned]\n\
• Interest Rate: [Annual percentage rate - fixed/floating]\n\
• Loan Tenure: [Duration in months/years]\n\
• EMI Amount: [Monthly installment amount if mentioned]\n\
• Processing Fee: [One-time charges]\n\
• Other Charges: [Documentation, legal, insurance, etc.]\n\n\
REPAYMENT TERMS:\n\
• EMI Start Date: [When payments begin]\n\
• EMI Due Date: [Monthly payment date]\n\
• Prepayment Terms: [Partial/full prepayment conditions]\n\
• Late Payment Penalty: [Charges for delayed payments]\n\
• Grace Period: [If any]\n\n\
---\n\n\
PHASE 2 - EMI CALCULATIONS & FINANCIAL BREAKDOWN:\n\
Based on the loan details extracted, calculate and provide:\n\n\
EMI CALCULATION FORMULA:\n\
• Show the EMI calculation using: EMI = [P × R × (1+R)^N] / [(1+R)^N - 1]\n\
• Where P = Principal, R = Monthly interest rate, N = Number of months\n\n\
MONTHLY EMI BREAKDOWN:\n\
• Monthly EMI Amount: ₹[calculated amount]\n\
• Principal Component (Month 1): ₹[amount going toward principal]\n\
• Interest Component (Month 1): ₹[amount going toward interest]\n\
• Outstanding Balance After Month 1: ₹[remaining amount]\n\n\
TOTAL PAYMENT ANALYSIS:\n\
• Total Amount Payable: ₹[EMI × Number of months]\n\
• Total Interest Payable: ₹[Total payable - Principal]\n\
• Interest as % of Principal: [Percentage]\n\
• Total Cost including all charges: ₹[Including processing fee and other charges]\n\n\
YEAR-WISE PAYMENT BREAKDOWN:\n\
For each year of the loan, provide:\n\
Year 1:\n\
• Total EMI Payments: ₹[12 × EMI or remaining months]\n\
• Principal Repaid: ₹[amount]\n\
• Interest Paid: ₹[amount]\n\
• Outstanding Balance at Year End: ₹[amount]\n\
[Repeat for each year until loan completion]\n\n\
---\n\n\
PHASE 3 - DETAILED MONTHLY PAYMENT SCHEDULE:\n\
Provide a month-by-month breakdown for at least the first 12 months:\n\n\
Month 1: EMI ₹[amount] | Principal ₹[amount] | Interest ₹[amount] | Balance ₹[amount]\n\
Month 2: EMI ₹[amount] | Principal ₹[amount] | Interest ₹[amount] | Balance ₹[amount]\n\
[Continue for first 12 months]\n\n\
MILESTONE PAYMENTS:\n\
• 25% of loan repaid by: Month [number] (₹[amount] paid)\n\
• 50% of loan repaid by: Month [number] (₹[amount] paid)\n\
• 75% of loan repaid by: Month [number] (₹[amount] paid)\n\
• 100% of loan repaid by: Month [number] (₹[amount] paid)\n\n\
---\n\n\
PHASE 4 - FINANCIAL IMPACT ANALYSIS:\n\
AFFORDABILITY ASSESSMENT:\n\
• Recommended Monthly Income: ₹[EMI should be max 40% of income]\n\
• Debt-to-Income Ratio: [If EMI is 40% of income]\n\n\
COST OPTIMIZATION SUGGESTIONS:\n\
• Prepayment Strategy: [How much to save on interest with prepayments]\n\
• If you prepay ₹[amount] annually: Total interest savings = ₹[amount]\n\
• If you prepay ₹[amount] in Year 5: Total interest savings = ₹[amount]\n\n\
RISK FACTORS:\n\
• Variable Interest Rate Risk: [If applicable]\n\
• Late Payment Impact: [Additional cost per delayed payment]\n\
• Prepayment Penalty: [Cost if you want to close loan early]\n\n\
COMPARISON WITH ALTERNATIVES:\n\
• If interest rate was 1% lower: Monthly savings = ₹[amount], Total savings = ₹[amount]\n\
• If tenure was 12 months shorter: Monthly EMI = ₹[amount], Total interest savings = ₹[amount]\n\
• If tenure was 12 months longer: Monthly EMI = ₹[amount], Additional interest cost = ₹[amount]\n\n\
---\n\n\
PHASE 5 - ACTION RECOMMENDATIONS:\n\
IMMEDIATE ACTIONS:\n\
• Set up auto-debit for EMI payments\n\
• Budget ₹[EMI amount + buffer] monthly for loan repayment\n\
• Review and understand all terms and conditions\n\n\
FINANCIAL PLANNING:\n\
• Emergency Fund: Keep ₹[3-6 months of EMI] as backup\n\
• Prepayment Strategy: [When and how much to prepay for maximum benefit]\n\
• Insurance: Ensure adequate life/health insurance to cover loan amount\n\n\
MONITORING:\n\
• Track payments and outstanding balance monthly\n\
• Review interest rate changes (if floating rate)\n\
• Consider refinancing if better rates become available\n\n\
Note: All calculations should be precise and based on standard EMI calculation formulas. If any loan details are missing from the document, clearly state what information is needed for complete analysis.";
