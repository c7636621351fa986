//! Integration tests for the modelgen binary.

use assert_cmd::cargo;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SHOP: &str = r#"
[[modules]]
name = "Shop"
comment = "Storefront"

[[modules.enums]]
name = "Status"
literals = ["Open", "Paid"]

[[modules.entities]]
name = "Order"
extends = "Document"

[[modules.entities.attributes]]
name = "total"
type = "decimal"

[[modules.entities.enum_attributes]]
name = "status"
enum = "Status"

[[modules.entities.relations]]
name = "items"
kind = "one-to-many"
target = "LineItem"

[[modules.entities.relations]]
name = "buyer"
kind = "many-to-one"
target = "crm.Customer"

[[modules.entities]]
name = "Document"
abstract = true

[[modules.entities.attributes]]
name = "created_at"
type = "datetime"

[[modules.entities]]
name = "LineItem"

[[modules.modules]]
name = "Billing"

[[modules.modules.entities]]
name = "Invoice"

[[imports]]
name = "crm"
library = "crm-lib"
entities = ["Customer"]
"#;

/// A temp working directory with its own config home.
struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, contents).unwrap();
        path
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn cmd(&self) -> assert_cmd::Command {
        let mut cmd = cargo::cargo_bin_cmd!("modelgen");
        cmd.current_dir(self.path())
            .env("HOME", self.path())
            .env("XDG_CONFIG_HOME", self.path().join("xdg"))
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
        cmd
    }
}

fn json_stdout(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

// ── basics ────────────────────────────────────────────────────────────────────

#[test]
fn test_help_flag() {
    let ws = Workspace::new();
    ws.cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("modelgen"))
        .stdout(predicate::str::contains("relations"));
}

#[test]
fn test_version_flag() {
    let ws = Workspace::new();
    ws.cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_unknown_flag_is_usage_error() {
    let ws = Workspace::new();
    ws.cmd().args(["check", "--bogus"]).assert().code(2);
}

// ── check ─────────────────────────────────────────────────────────────────────

#[test]
fn test_check_clean_model() {
    let ws = Workspace::new();
    ws.write("shop.toml", SHOP);

    ws.cmd()
        .args(["check", "shop.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Model is valid"));
}

#[test]
fn test_check_json_report() {
    let ws = Workspace::new();
    ws.write("shop.toml", SHOP);

    let output = ws
        .cmd()
        .args(["--output-format", "json", "check", "shop.toml"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report = json_stdout(&output);
    assert_eq!(report["modules"], 2);
    assert_eq!(report["imports"], 1);
    assert_eq!(report["local_entities"], 4);
    assert_eq!(report["imported_entities"], 1);
    assert_eq!(report["declared_relations"], 2);
    assert_eq!(report["unresolved"].as_array().unwrap().len(), 0);
}

#[test]
fn test_check_unresolved_is_warning_unless_strict() {
    let ws = Workspace::new();
    ws.write(
        "ghost.toml",
        r#"
[[modules]]
name = "Shop"

[[modules.entities]]
name = "Order"

[[modules.entities.relations]]
name = "ghost"
kind = "one-to-one"
target = "Missing"
"#,
    );

    ws.cmd()
        .args(["check", "ghost.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Missing"));

    ws.cmd()
        .args(["check", "ghost.toml", "--strict"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("1 unresolved reference(s)"));
}

// ── modules ───────────────────────────────────────────────────────────────────

#[test]
fn test_modules_lists_nested_names() {
    let ws = Workspace::new();
    ws.write("shop.toml", SHOP);

    ws.cmd()
        .args(["modules", "shop.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Shop.Billing"))
        .stdout(predicate::str::contains("Storefront"));
}

#[test]
fn test_modules_from_directory() {
    let ws = Workspace::new();
    ws.write("models/shop.model.toml", SHOP);
    ws.write(
        "models/hr/hr.model.json",
        r#"{ "modules": [ { "name": "Hr", "entities": [ { "name": "Person" } ] } ] }"#,
    );
    ws.write("models/README.md", "not a model");

    let output = ws
        .cmd()
        .args(["--output-format", "json", "ls", "models"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let modules = json_stdout(&output);
    let names: Vec<&str> = modules
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"Hr"));
    assert!(names.contains(&"Shop"));
    assert!(names.contains(&"Shop.Billing"));
}

// ── relations ─────────────────────────────────────────────────────────────────

#[test]
fn test_relations_mirror_one_to_many() {
    let ws = Workspace::new();
    ws.write("shop.toml", SHOP);

    let output = ws
        .cmd()
        .args(["--output-format", "json", "relations", "shop.toml", "-m", "Shop"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let table = json_stdout(&output);
    let entries = table.as_array().unwrap();
    let order = entries
        .iter()
        .find(|e| e["entity"] == "Shop.Order")
        .unwrap();
    let line_item = entries
        .iter()
        .find(|e| e["entity"] == "Shop.LineItem")
        .unwrap();

    // the buyer relation targets an imported entity and is not in the map
    assert_eq!(order["relations"].as_array().unwrap().len(), 1);
    assert_eq!(order["relations"][0]["target"], "Shop.LineItem");
    assert_eq!(order["relations"][0]["cardinality"], "OneToMany");
    assert_eq!(order["relations"][0]["owner"], false);

    assert_eq!(line_item["relations"][0]["target"], "Shop.Order");
    assert_eq!(line_item["relations"][0]["cardinality"], "ManyToOne");
    assert_eq!(line_item["relations"][0]["owner"], true);
}

#[test]
fn test_relations_requires_module() {
    let ws = Workspace::new();
    ws.write("shop.toml", SHOP);

    ws.cmd()
        .args(["relations", "shop.toml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No module given"));
}

#[test]
fn test_relations_uses_default_module_from_config() {
    let ws = Workspace::new();
    ws.write("shop.toml", SHOP);
    ws.write(".modelgen.toml", "[resolve]\ndefault_module = \"Shop\"\n");

    ws.cmd()
        .args(["relations", "shop.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Shop.LineItem"));
}

#[test]
fn test_unknown_module_is_not_found() {
    let ws = Workspace::new();
    ws.write("shop.toml", SHOP);

    ws.cmd()
        .args(["relations", "shop.toml", "-m", "Warehouse"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Module not found: Warehouse"));
}

// ── order ─────────────────────────────────────────────────────────────────────

#[test]
fn test_order_puts_supertype_first() {
    let ws = Workspace::new();
    ws.write("shop.toml", SHOP);

    let output = ws
        .cmd()
        .args(["--output-format", "json", "order", "shop.toml", "-m", "Shop"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let order: Vec<String> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(order.len(), 3);
    let position = |name: &str| order.iter().position(|n| n == name).unwrap();
    assert!(position("Shop.Document") < position("Shop.Order"));
}

// ── resolve ───────────────────────────────────────────────────────────────────

#[test]
fn test_resolve_flattens_inherited_attributes() {
    let ws = Workspace::new();
    ws.write("shop.toml", SHOP);

    let output = ws
        .cmd()
        .args(["--output-format", "json", "resolve", "shop.toml", "-m", "Shop"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let modules = json_stdout(&output);
    assert_eq!(modules.as_array().unwrap().len(), 1);
    let order = modules[0]["entities"]
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["name"] == "Order")
        .unwrap();
    assert_eq!(order["supertype"], "Shop.Document");
    let attributes: Vec<&str> = order["attributes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["name"].as_str().unwrap())
        .collect();
    assert_eq!(attributes, ["created_at", "total"]);
}

#[test]
fn test_resolve_all_modules_without_flag() {
    let ws = Workspace::new();
    ws.write("shop.toml", SHOP);

    ws.cmd()
        .args(["resolve", "shop.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Module Shop"))
        .stdout(predicate::str::contains("Module Shop.Billing"));
}

#[test]
fn test_resolve_skip_abstract() {
    let ws = Workspace::new();
    ws.write("shop.toml", SHOP);

    ws.cmd()
        .args(["resolve", "shop.toml", "-m", "Shop", "--skip-abstract"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Shop.Order"))
        .stdout(predicate::str::contains("(abstract)").not());
}

#[test]
fn test_resolve_include_abstract_from_env() {
    let ws = Workspace::new();
    ws.write("shop.toml", SHOP);

    ws.cmd()
        .env("MODELGEN__RESOLVE__INCLUDE_ABSTRACT", "false")
        .args(["resolve", "shop.toml", "-m", "Shop"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(abstract)").not());
}

// ── init / config ─────────────────────────────────────────────────────────────

#[test]
fn test_init_local_then_refuses_overwrite() {
    let ws = Workspace::new();

    ws.cmd().args(["init", "--local"]).assert().success();
    let written = fs::read_to_string(ws.path().join(".modelgen.toml")).unwrap();
    assert!(written.contains("include_abstract = true"));

    ws.cmd()
        .args(["init", "--local"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--force"));

    ws.cmd().args(["init", "--local", "--force"]).assert().success();
}

#[test]
fn test_config_get_reads_local_file() {
    let ws = Workspace::new();
    ws.write(".modelgen.toml", "[output]\nformat = \"plain\"\n");

    ws.cmd()
        .args(["config", "get", "output.format"])
        .assert()
        .success()
        .stdout(predicate::str::contains("output.format = plain"));
}

#[test]
fn test_config_path_honours_flag() {
    let ws = Workspace::new();
    let explicit = ws.write("custom.toml", "");

    ws.cmd()
        .arg("--config")
        .arg(&explicit)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("custom.toml"));
}

#[test]
fn test_completions_bash() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("modelgen"));
}
