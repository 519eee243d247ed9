#[cfg(test)]
#[path = "canned_test.rs"]
mod canned_test;

pub const TAX_RETENTION_REPLY: &str = "Tax retention refers to the practice of withholding a portion of income or payment to ensure taxes are properly collected. It is typically done by employers or businesses, who retain a portion of salaries, wages, or payments to fulfill tax obligations before the remaining amount is given to the individual or company.";

pub const SEE_PROMPTS_REPLY: &str = "Please refer to the above predefined prompt.";

pub const NEWSLETTER_SUMMARY_REPLY: &str = "The newsletter discusses the importance of tax retention for Kuwaiti companies, even though they are exempt from income tax. Key points include:\n\n1. Retention Obligation: All companies in Kuwait are required to retain 5% from each payment made to any company, regardless of their location.\n\n2. Tax Clearance Certificate (TCC): Kuwaiti companies must obtain an annual TCC from the Kuwait Tax Authority, despite being exempt from income tax.\n\n3. Liability for Defaulting Foreign Companies: If a foreign company leaves Kuwait without settling tax liabilities, the Kuwait Tax Authority can collect the due payment from the Kuwaiti contract owner.\n\n4. Consequences of Non-Compliance: Failure to adhere to tax retention regulations can result in penalties.";

/// A fixed reply selected by keyword.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CannedResponse {
    /// Lowercase phrases; any one appearing in the input selects this entry.
    pub triggers: Vec<String>,
    pub reply: String,
}

impl CannedResponse {
    #[must_use]
    pub fn new(triggers: &[&str], reply: &str) -> Self {
        Self { triggers: triggers.iter().map(|t| t.to_lowercase()).collect(), reply: reply.to_owned() }
    }

    fn matches(&self, lowered_input: &str) -> bool {
        self.triggers.iter().any(|t| lowered_input.contains(t.as_str()))
    }
}

/// Ordered canned-response table. Earlier entries win.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CannedResponses {
    entries: Vec<CannedResponse>,
}

impl CannedResponses {
    #[must_use]
    pub fn new(entries: Vec<CannedResponse>) -> Self {
        Self { entries }
    }

    /// A table that never matches; every submit goes to the network.
    #[must_use]
    pub fn none() -> Self {
        Self { entries: Vec::new() }
    }

    /// Reply of the first entry whose trigger occurs in `input`, ignoring case.
    #[must_use]
    pub fn find(&self, input: &str) -> Option<&str> {
        let lowered = input.to_lowercase();
        self.entries
            .iter()
            .find(|entry| entry.matches(&lowered))
            .map(|entry| entry.reply.as_str())
    }

    #[must_use]
    pub fn entries(&self) -> &[CannedResponse] {
        &self.entries
    }
}

impl Default for CannedResponses {
    fn default() -> Self {
        Self::new(vec![
            CannedResponse::new(&["tax retention"], TAX_RETENTION_REPLY),
            CannedResponse::new(&["talk to expert", "talk to rsm", "book a consultancy"], SEE_PROMPTS_REPLY),
            CannedResponse::new(&["learn more", "read more"], SEE_PROMPTS_REPLY),
            CannedResponse::new(&["summary of newsletter"], NEWSLETTER_SUMMARY_REPLY),
        ])
    }
}
