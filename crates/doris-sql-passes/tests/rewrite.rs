//! Dimension rewriting of column references.

mod common;
use common::*;

use std::collections::HashMap;

use doris_sql_passes::{DimensionRewriter, RewriteOptions};
use indoc::indoc;
use pretty_assertions::assert_eq;

fn field_aliases() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        ("pod_namespace", "__ext.io_kubernetes_pod_namespace"),
        ("serverIp", "test_server_ip"),
    ])
}

fn rewrite(sql: &str) -> String {
    let aliases = field_aliases();
    let statement = parse(sql);
    DimensionRewriter::new(|name: &str| aliases.get(name).map(|alias| (*alias).to_owned()))
        .rewrite(sql, &statement)
        .unwrap()
}

#[test]
fn renames_every_reference() {
    assert_eq!(
        rewrite("SELECT serverIp, COUNT(*) AS log_count FROM logs WHERE serverIp != '' GROUP BY serverIp"),
        "SELECT test_server_ip AS serverIp, COUNT(*) AS log_count FROM logs \
         WHERE test_server_ip != '' GROUP BY test_server_ip"
    );
}

#[test]
fn aliased_items_keep_their_alias() {
    assert_eq!(
        rewrite("SELECT pod_namespace AS ns FROM t"),
        "SELECT __ext.io_kubernetes_pod_namespace AS ns FROM t"
    );
}

#[test]
fn expressions_in_the_select_list_are_not_aliased() {
    assert_eq!(
        rewrite("SELECT upper(pod_namespace) FROM t"),
        "SELECT upper(__ext.io_kubernetes_pod_namespace) FROM t"
    );
}

#[test]
fn source_formatting_is_preserved() {
    let sql = indoc! {"
        select pod_namespace,
               count(*)   -- per namespace
        from   logs
        where  pod_namespace like 'kube%'
        group  by pod_namespace"};
    let expected = indoc! {"
        select __ext.io_kubernetes_pod_namespace AS pod_namespace,
               count(*)   -- per namespace
        from   logs
        where  __ext.io_kubernetes_pod_namespace like 'kube%'
        group  by __ext.io_kubernetes_pod_namespace"};
    assert_eq!(rewrite(sql), expected);
}

#[test]
fn strings_and_unmapped_names_are_untouched() {
    let sql = "SELECT a FROM t WHERE b = 'serverIp'";
    assert_eq!(rewrite(sql), sql);
}

#[test]
fn lambda_parameters_are_not_renamed() {
    let sql = "SELECT array_map(x -> x + 1, x) FROM t";
    let statement = parse(sql);
    let rewritten = DimensionRewriter::new(|name: &str| (name == "x").then(|| "xs".to_owned()))
        .rewrite(sql, &statement)
        .unwrap();
    assert_eq!(rewritten, "SELECT array_map(x -> x + 1, xs) FROM t");
}

#[test]
fn qualified_names_are_offered_whole() {
    let sql = "SELECT t.a FROM t";
    let statement = parse(sql);
    let mut offered = Vec::new();
    let rewritten = DimensionRewriter::new(|name: &str| {
        offered.push(name.to_owned());
        (name == "t.a").then(|| "t.attr".to_owned())
    })
    .rewrite(sql, &statement)
    .unwrap();
    assert_eq!(rewritten, "SELECT t.attr AS a FROM t");
    assert_eq!(offered, ["t.a"]);
}

#[test]
fn aliasing_can_be_disabled() {
    let sql = "SELECT serverIp FROM t";
    let statement = parse(sql);
    let options = RewriteOptions {
        alias_select_columns: false,
    };
    let rewritten = DimensionRewriter::with_options(
        |name: &str| (name == "serverIp").then(|| "ip".to_owned()),
        options,
    )
    .rewrite(sql, &statement)
    .unwrap();
    assert_eq!(rewritten, "SELECT ip FROM t");
}

#[test]
fn batch_members_use_absolute_spans() {
    let sql = "SELECT 1; SELECT serverIp FROM t";
    let results = doris_sql_core::parse_batch(sql);
    let second = results[1].as_ref().unwrap();
    let rewritten = DimensionRewriter::new(|name: &str| (name == "serverIp").then(|| "ip".to_owned()))
        .rewrite(sql, second)
        .unwrap();
    assert_eq!(rewritten, "SELECT ip AS serverIp FROM t");
}

#[test]
fn rewritten_text_parses_again() {
    let sql = "SELECT serverIp, pod_namespace FROM t WHERE serverIp > 0 ORDER BY pod_namespace";
    let rewritten = rewrite(sql);
    let reparsed = parse(&rewritten);
    let refs = doris_sql_passes::ReferenceExtractor::new().extract(&reparsed);
    assert_eq!(
        refs.columns(),
        ["test_server_ip", "__ext.io_kubernetes_pod_namespace"]
    );
}
