use chrono::NaiveDate;

/// Assemble the instruction text sent along with the structure image.
///
/// The wording is fixed; only the report header fields and the date are
/// interpolated. Given the same inputs and date the output is byte
/// identical.
pub fn render(title: &str, prepared_by: &str, prepared_for: &str, date: NaiveDate) -> String {
    format!(
        "\
Assume you are a structural engineer. The user has provided an image of a structure.
You need to identify the structural defects in the image and generate a report.

The report must contain:
- Title: {title}
- Prepared by: {prepared_by}
- Prepared for: {prepared_for}
- Date: {date}

Instructions:
* Identify and classify each defect (crack, spalling, corrosion, honeycombing, etc.)
* Provide a description and potential impact of each defect
* Rate severity (Low / Medium / High)
* Estimate time before permanent damage
* Suggest short-term and long-term solutions with estimated costs (₹) and time
* Provide preventive measures
* Use bullet points and tables where possible
* Keep report ≤ 3 pages
"
    )
}
