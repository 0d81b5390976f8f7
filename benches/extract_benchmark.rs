//! Benchmarks for register extraction performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks test extraction throughput at various register sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::io::Cursor;

/// Creates a synthetic register workbook with the given number of data rows.
fn create_test_register(row_count: usize) -> Vec<u8> {
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    let mut buffer = Vec::new();
    let mut zip = ZipWriter::new(Cursor::new(&mut buffer));

    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);

    // [Content_Types].xml
    zip.start_file("[Content_Types].xml", options).unwrap();
    zip.write_all(
        br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
</Types>"#,
    )
    .unwrap();

    // _rels/.rels
    zip.start_file("_rels/.rels", options).unwrap();
    zip.write_all(
        br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#,
    )
    .unwrap();

    // xl/workbook.xml
    zip.start_file("xl/workbook.xml", options).unwrap();
    zip.write_all(
        br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <sheets>
    <sheet name="Letters" sheetId="1" r:id="rId1"/>
  </sheets>
</workbook>"#,
    )
    .unwrap();

    // xl/_rels/workbook.xml.rels
    zip.start_file("xl/_rels/workbook.xml.rels", options)
        .unwrap();
    zip.write_all(
        br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
</Relationships>"#,
    )
    .unwrap();

    // Generate worksheet content: a header row plus data rows with all 15
    // register columns populated.
    let mut content = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <sheetData>
    <row r="1"><c r="A1" t="inlineStr"><is><t>Letter No</t></is></c></row>"#,
    );

    let columns = [
        "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O",
    ];
    for i in 0..row_count {
        let row = i + 2;
        content.push_str(&format!("\n    <row r=\"{}\">", row));
        for (col_idx, col) in columns.iter().enumerate() {
            content.push_str(&format!(
                r#"<c r="{}{}" t="inlineStr"><is><t>value {} {}</t></is></c>"#,
                col, row, i, col_idx
            ));
        }
        content.push_str("</row>");
    }

    content.push_str(
        r#"
  </sheetData>
</worksheet>"#,
    );

    zip.start_file("xl/worksheets/sheet1.xml", options).unwrap();
    zip.write_all(content.as_bytes()).unwrap();

    zip.finish().unwrap();
    buffer
}

/// Benchmark register extraction at various sizes.
fn bench_register_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("register_extraction");

    for row_count in [10, 100, 1000, 5000].iter() {
        let data = create_test_register(*row_count);
        let size = data.len() as u64;

        group.throughput(Throughput::Bytes(size));
        group.bench_with_input(BenchmarkId::new("rows", row_count), &data, |b, data| {
            b.iter(|| {
                let _ = lettersheet::extract_bytes(black_box(data));
            });
        });
    }

    group.finish();
}

/// Benchmark JSON rendering of an extracted register.
fn bench_json_rendering(c: &mut Criterion) {
    let mut group = c.benchmark_group("json_rendering");

    for row_count in [10, 100, 1000].iter() {
        let data = create_test_register(*row_count);
        let register = lettersheet::extract_bytes(&data).unwrap();

        group.bench_with_input(
            BenchmarkId::new("rows", row_count),
            &register,
            |b, register| {
                b.iter(|| {
                    let _ = lettersheet::render::to_json(
                        black_box(register),
                        lettersheet::JsonFormat::Pretty,
                    );
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_register_extraction, bench_json_rendering);
criterion_main!(benches);
