use crate::model::variables::VariableRow;

/// Parse tab-separated text: header line first, one row per following line.
/// Short lines get empty values for their missing trailing columns; extra
/// fields beyond the header are dropped.
pub fn parse_tsv(text: &str) -> Vec<VariableRow> {
    let mut lines = text.trim().lines();

    let Some(header) = lines.next() else {
        return Vec::new();
    };
    let headers: Vec<&str> = header.split('\t').map(|h| h.trim_end_matches('\r')).collect();

    lines
        .map(|line| {
            let mut values = line.trim_end_matches('\r').split('\t');
            headers
                .iter()
                .map(|name| (*name, values.next().unwrap_or_default()))
                .collect()
        })
        .collect()
}
