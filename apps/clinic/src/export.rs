//! # CSV Export
//!
//! Renders the receivables listing as CSV for the accountant. Output is
//! RFC 4180 shaped: CRLF line endings, fields quoted only when they
//! contain a comma, quote, or line break.

use vetfin_core::ReceivableInvoice;

const HEADER: &str = "id,issue_date,due_date,customer,number,amount,paid_date";

/// Renders invoices to CSV, header row included. Amounts are plain
/// decimals (`1234.56`), dates ISO-8601, unpaid invoices get an empty
/// `paid_date` field.
pub fn receivables_csv(invoices: &[ReceivableInvoice]) -> String {
    let mut out = String::with_capacity(64 + invoices.len() * 64);
    out.push_str(HEADER);
    out.push_str("\r\n");

    for invoice in invoices {
        let fields = [
            invoice.id.to_string(),
            invoice.issue_date.to_string(),
            invoice.due_date.to_string(),
            invoice.customer.clone(),
            invoice.number.clone().unwrap_or_default(),
            format_amount(invoice.amount_cents),
            invoice
                .paid_date
                .map(|d| d.to_string())
                .unwrap_or_default(),
        ];

        let mut first = true;
        for field in fields {
            if !first {
                out.push(',');
            }
            first = false;
            out.push_str(&escape(&field));
        }
        out.push_str("\r\n");
    }

    out
}

/// Grosz to a plain decimal string: 123456 -> "1234.56".
fn format_amount(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}

fn escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r')
    {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn invoice(customer: &str, amount: i64) -> ReceivableInvoice {
        ReceivableInvoice {
            id: 7,
            issue_date: d("2024-05-02"),
            due_date: d("2024-05-16"),
            customer: customer.to_string(),
            number: Some("FV/2024/12".to_string()),
            category: None,
            amount_cents: amount,
            notes: None,
            paid: false,
            paid_date: None,
        }
    }

    #[test]
    fn test_plain_row() {
        let csv = receivables_csv(&[invoice("Gospodarstwo Kowalski", 123_456)]);
        let mut lines = csv.split("\r\n");

        assert_eq!(lines.next().unwrap(), HEADER);
        assert_eq!(
            lines.next().unwrap(),
            "7,2024-05-02,2024-05-16,Gospodarstwo Kowalski,FV/2024/12,1234.56,"
        );
    }

    #[test]
    fn test_comma_and_quote_are_escaped() {
        let csv = receivables_csv(&[invoice("Stajnia \"Mustang\", Kraków", 5_000)]);
        assert!(csv.contains("\"Stajnia \"\"Mustang\"\", Kraków\""));
    }

    #[test]
    fn test_amount_formatting() {
        assert_eq!(format_amount(5), "0.05");
        assert_eq!(format_amount(-12_305), "-123.05");
    }
}
