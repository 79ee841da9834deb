#![forbid(unsafe_code)]

use bp_core::{normalize, render_table, BindingRecord, DisplayRow, Subject, HEADER};

fn crb(name: &str, role: &str, subjects: Vec<Subject>) -> BindingRecord {
    BindingRecord::ClusterBinding { name: name.to_string(), role_ref_name: role.to_string(), subjects }
}

fn rb(name: &str, role: &str, subjects: Vec<Subject>) -> BindingRecord {
    BindingRecord::NamespaceBinding { name: name.to_string(), role_ref_name: role.to_string(), subjects }
}

fn tuple(r: &DisplayRow) -> (&str, &str, &str, &str) {
    (&r.binding_name, &r.role_name, &r.subject_kind, &r.subject_name)
}

#[test]
fn empty_input_yields_no_rows() {
    assert!(normalize(&[]).is_empty());
    assert_eq!(normalize(&[]), normalize(&[]));
}

#[test]
fn missing_subjects_become_none_none() {
    let rows = normalize(&[crb("system:basic", "system:discovery", vec![]), rb("dev-empty", "edit", vec![])]);
    assert_eq!(tuple(&rows[0]), ("system:basic", "system:discovery", "none", "none"));
    assert_eq!(tuple(&rows[1]), ("dev-empty", "edit", "none", "none"));
}

#[test]
fn only_first_subject_is_shown() {
    let rows = normalize(&[rb(
        "team",
        "view",
        vec![Subject::new("Group", "devs"), Subject::new("User", "bob"), Subject::new("ServiceAccount", "ci")],
    )]);
    assert_eq!(rows.len(), 1);
    assert_eq!(tuple(&rows[0]), ("team", "view", "Group", "devs"));
}

#[test]
fn order_and_count_are_preserved() {
    let records = vec![
        crb("c", "cluster-admin", vec![Subject::new("User", "alice")]),
        crb("a", "view", vec![]),
        crb("b", "edit", vec![Subject::new("Group", "ops"), Subject::new("User", "x")]),
    ];
    let rows = normalize(&records);
    assert_eq!(rows.len(), records.len());
    for (record, row) in records.iter().zip(rows.iter()) {
        assert_eq!(row.binding_name, record.name());
        assert_eq!(row.role_name, record.role_ref_name());
    }
    let names: Vec<_> = rows.iter().map(|r| r.binding_name.as_str()).collect();
    assert_eq!(names, vec!["c", "a", "b"]);
}

#[test]
fn both_variants_render_identically() {
    let subjects = vec![Subject::new("User", "alice")];
    let a = normalize(&[crb("x", "y", subjects.clone())]);
    let b = normalize(&[rb("x", "y", subjects)]);
    assert_eq!(a, b);
}

#[test]
fn normalized_rows_render_under_header() {
    let rows = normalize(&[crb("admin-binding", "cluster-admin", vec![Subject::new("User", "alice")])]);
    let mut buf = Vec::new();
    render_table(&mut buf, &HEADER, &rows).expect("render");
    let out = String::from_utf8(buf).expect("utf8");
    let lines: Vec<_> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("BindingName"));
    let cells: Vec<_> = lines[1].split('\t').map(str::trim_end).collect();
    assert_eq!(cells, vec!["admin-binding", "cluster-admin", "User", "alice"]);
}
