use std::collections::HashMap;
use crate::error::ParseError;
use crate::model::record::SalesRecord;

/// Parses one record line: `staff,timestamp,[P1:5|P2:3],amount`.
pub fn parse_record_line(line: &str) -> Result<SalesRecord, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(ParseError::Empty);
    }

    let mut fields = line.splitn(4, ',').map(str::trim);
    let staff_id = fields.next().ok_or(ParseError::MissingField("staff_id"))?;
    let timestamp = fields.next().ok_or(ParseError::MissingField("timestamp"))?;
    let products = fields.next().ok_or(ParseError::MissingField("products"))?;
    let amount = fields.next().ok_or(ParseError::MissingField("sales_amount"))?;

    Ok(SalesRecord {
        staff_id: staff_id.to_string(),
        timestamp: timestamp.to_string(),
        products_sold: parse_products(products)?,
        sales_amount: parse_amount(amount)?,
    })
}

/// Decodes `[P1:5|P2:3]`. Pairs without exactly one `:` are skipped.
pub fn parse_products(input: &str) -> Result<HashMap<String, u32>, ParseError> {
    let cleaned: String = input.chars().filter(|c| *c != '[' && *c != ']').collect();
    let mut products = HashMap::new();

    if cleaned.is_empty() {
        return Ok(products);
    }

    for pair in cleaned.split('|') {
        let parts: Vec<&str> = pair.split(':').collect();
        if parts.len() != 2 {
            continue;
        }
        let quantity = parts[1].parse::<u32>().map_err(|_| ParseError::InvalidQuantity {
            product: parts[0].to_string(),
            quantity: parts[1].to_string(),
        })?;
        products.insert(parts[0].to_string(), quantity);
    }

    Ok(products)
}

/// Amounts may carry decimals; the fraction is dropped.
pub fn parse_amount(input: &str) -> Result<u64, ParseError> {
    let value: f64 = input
        .parse()
        .map_err(|_| ParseError::InvalidAmount(input.to_string()))?;

    if !value.is_finite() || value < 0.0 || value >= u64::MAX as f64 {
        return Err(ParseError::InvalidAmount(input.to_string()));
    }
    Ok(value.trunc() as u64)
}
