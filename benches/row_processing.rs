use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use record_validator::app::models::{HeaderLayout, RawRow};
use record_validator::app::services::field_rules::{canonicalize_date, strip_country_code};
use record_validator::app::services::row_processor::RowProcessor;
use record_validator::{LocaleProfile, RuleSet};

const HEADER: &[&str] = &["USPCID", "USCLID", "Mobile_No", "email_add", "AC_NO", "DOB"];

fn rules() -> RuleSet {
    RuleSet::from_requirements([
        ("USPCID", true),
        ("USCLID", true),
        ("email_add", true),
        ("Acc_no", true),
        ("DOB", true),
    ])
}

fn sample_rows(count: usize) -> Vec<Vec<String>> {
    (0..count)
        .map(|i| {
            let row: [String; 6] = match i % 4 {
                0 => [
                    format!("P{i}"),
                    format!("C{i}"),
                    "+682 55123".to_string(),
                    format!("user{i}@example.com"),
                    format!("{i}"),
                    "1/2/1990".to_string(),
                ],
                1 => [
                    format!("P{i}"),
                    format!("C{i}"),
                    "71234".to_string(),
                    "broken-address".to_string(),
                    "12ab".to_string(),
                    "01-02-1990".to_string(),
                ],
                2 => [
                    format!("P{i}"),
                    String::new(),
                    "22123".to_string(),
                    format!("user{i}@example.com"),
                    "0000012345".to_string(),
                    "31/12/1999".to_string(),
                ],
                _ => [
                    format!("P-{i}"),
                    format!("C{i}"),
                    String::new(),
                    format!("user{i}@example.com"),
                    "99".to_string(),
                    "not a date".to_string(),
                ],
            };
            row.to_vec()
        })
        .collect()
}

fn bench_process_rows(c: &mut Criterion) {
    let profile = LocaleProfile::cook_islands();
    let layout = HeaderLayout::new(HEADER.iter().copied(), &profile);
    let processor = RowProcessor::new(rules(), profile);

    let mut group = c.benchmark_group("process_rows");
    for size in [100, 1_000] {
        let rows: Vec<RawRow<'_>> = sample_rows(size)
            .into_iter()
            .filter_map(|values| RawRow::new(&layout, values))
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), &rows, |b, rows| {
            b.iter(|| {
                let mut clean = 0usize;
                for (i, row) in rows.iter().enumerate() {
                    if processor.process(black_box(row), i + 1).is_clean() {
                        clean += 1;
                    }
                }
                clean
            })
        });
    }
    group.finish();
}

fn bench_field_normalizers(c: &mut Criterion) {
    let samoa = LocaleProfile::samoa();
    let fallbacks = samoa.dob_fallback_formats.clone();

    c.bench_function("strip_country_code", |b| {
        b.iter(|| strip_country_code(black_box("+685 7123456"), &samoa))
    });
    c.bench_function("canonicalize_date_separator_fallback", |b| {
        b.iter(|| canonicalize_date(black_box("1-2-90"), &fallbacks))
    });
}

criterion_group!(benches, bench_process_rows, bench_field_normalizers);
criterion_main!(benches);
