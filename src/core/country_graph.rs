use crate::domain::model::{CountryMatrix, CountryToCountry, DomainSelector, ResolvedCounts};

/// Origin -> resolved -> count for one day. A literal domain yields that
/// domain's matrix; `All` sums every domain's matrix cell by cell. Unknown
/// resolution targets are dropped and absent data yields an empty map.
pub fn countries_by_domain(
    dataset: Option<&CountryToCountry>,
    selector: &DomainSelector,
) -> CountryMatrix {
    let Some(dataset) = dataset else {
        return CountryMatrix::new();
    };

    let mut merged = CountryMatrix::new();
    match selector {
        DomainSelector::Domain(domain) => {
            if let Some(matrix) = dataset.domain(domain) {
                accumulate(&mut merged, matrix);
            }
        }
        DomainSelector::All => {
            for matrix in dataset.domains.values() {
                accumulate(&mut merged, matrix);
            }
        }
    }

    tracing::trace!("countries_by_domain produced {} origins", merged.len());
    merged
}

/// Adds `matrix` into `acc` cell by cell. Origins are kept even when all of
/// their targets are unknown, so a selected origin still shows up with an
/// empty row.
fn accumulate(acc: &mut CountryMatrix, matrix: &CountryMatrix) {
    for (origin, resolved) in matrix {
        let row: &mut ResolvedCounts = acc.entry(origin.clone()).or_default();
        for (country, count) in resolved {
            if country.is_unknown() {
                continue;
            }
            *row.entry(country.clone()).or_insert(0.0) += count;
        }
    }
}

/// Domains measured on a day, sorted.
pub fn list_domains(dataset: Option<&CountryToCountry>) -> Vec<String> {
    dataset
        .map(|d| d.domain_names().map(str::to_string).collect())
        .unwrap_or_default()
}
