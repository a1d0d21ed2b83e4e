use super::*;
use x7z_engine::Timestamp;

fn entry(name: &str, mode: &str, size: Option<u64>, packed: Option<u64>) -> EntryRecord {
    EntryRecord {
        mode: Some(mode.to_owned()),
        file_size: size,
        compress_size: packed,
        date_time: Some(Timestamp::from((2021, 3, 4, 5, 6, 7))),
        ..EntryRecord::new(name)
    }
}

fn sample() -> Vec<EntryRecord> {
    vec![
        entry("docs", "D_ drwxr-xr-x", Some(0), Some(0)),
        entry("docs/readme.txt", "A_ -rw-r--r--", Some(120), Some(80)),
        entry("notes.txt", "A", Some(5), None),
    ]
}

fn render<P: EntryPrinter>(printer: &mut P, entries: &[EntryRecord]) {
    let ctx = ListContext { archive: "sample.7z" };
    printer.begin(&ctx).expect("begin");
    for e in entries {
        printer.print_row(e, &ctx).expect("row");
    }
    printer.finish(&ctx).expect("finish");
}

#[test]
fn attribute_flag_columns() {
    let cases = [
        (Some("D"), "D...."),
        (Some("A"), "....A"),
        (Some("D_ drwxr-xr-x"), "D...."),
        (Some("R"), ".R..."),
        (Some("DR"), "DR..."),
        (Some("A_ -rw-r--r--"), "....A"),
        (None, "....."),
    ];

    for (mode, expected) in cases {
        let e = EntryRecord {
            mode: mode.map(str::to_owned),
            ..EntryRecord::new("x")
        };
        assert_eq!(attribute_flags(&e), expected, "mode: {mode:?}");
    }
}

#[test]
fn totals_count_files_and_folders() {
    let mut totals = Totals::default();
    for e in &sample() {
        totals.add(e);
    }

    assert_eq!(
        totals,
        Totals {
            files: 2,
            folders: 1,
            size: 125,
            compressed: 80,
        }
    );
}

#[test]
fn human_table_layout() {
    let mut printer = HumanPrinter::new(Vec::new());
    render(&mut printer, &sample());

    let text = String::from_utf8(printer.out).expect("utf-8");
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 7);
    assert_eq!(lines[0], HEADER);
    assert_eq!(lines[1], RULE);
    assert_eq!(
        lines[2],
        "2021-03-04 05:06:07 D....            0            0  docs"
    );
    assert_eq!(
        lines[3],
        "2021-03-04 05:06:07 ....A          120           80  docs/readme.txt"
    );
    assert_eq!(
        lines[4],
        "2021-03-04 05:06:07 ....A            5               notes.txt"
    );
    assert_eq!(lines[5], RULE);
    assert_eq!(
        lines[6],
        "                                   125           80  2 files, 1 folders"
    );

    // Names start right after the compressed column, as in the rule.
    let name_col = RULE.rfind("  ").expect("rule gap") + 2;
    for line in &lines[2..5] {
        assert_eq!(&line[name_col - 2..name_col], "  ", "{line}");
    }
}

#[test]
fn human_table_without_date_or_folders() {
    let e = EntryRecord {
        mode: Some("A".to_owned()),
        file_size: Some(3),
        ..EntryRecord::new("a.txt")
    };

    let mut printer = HumanPrinter::new(Vec::new());
    render(&mut printer, &[e]);
    assert_eq!(printer.totals().files, 1);

    let text = String::from_utf8(printer.out).expect("utf-8");
    let lines: Vec<&str> = text.lines().collect();
    assert!(lines[2].starts_with(&" ".repeat(20)), "{:?}", lines[2]);
    assert!(lines[4].ends_with("  1 files"), "{:?}", lines[4]);
}

#[test]
fn json_rows_and_summary() {
    let mut printer = JsonPrinter::new(Vec::new());
    render(&mut printer, &sample());

    let text = String::from_utf8(printer.out).expect("utf-8");
    let objs: Vec<serde_json::Value> = text
        .lines()
        .map(|l| serde_json::from_str(l).expect("valid json line"))
        .collect();

    assert_eq!(objs.len(), 4);

    let readme = &objs[1];
    assert_eq!(readme["type"], "entry");
    assert_eq!(readme["archive"], "sample.7z");
    assert_eq!(readme["entry"]["filename"], "docs/readme.txt");
    assert_eq!(readme["entry"]["file_size"], 120);
    assert_eq!(readme["entry"]["date_time"]["second"], 7);
    assert!(objs[2]["entry"]["compress_size"].is_null());

    let summary = &objs[3];
    assert_eq!(summary["type"], "summary");
    assert_eq!(summary["files"], 2);
    assert_eq!(summary["folders"], 1);
    assert_eq!(summary["size"], 125);
    assert_eq!(summary["compressed"], 80);
}
