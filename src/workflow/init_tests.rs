use super::init_working_dir;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

fn fake_install() -> tempfile::TempDir {
    let base = tempfile::tempdir().expect("create base");
    let root = base.path();
    fs::write(root.join("nextflow.config"), "includeConfig 'conf/base.config'\n")
        .expect("write nextflow.config");
    fs::create_dir_all(root.join("conf").join("profiles")).expect("create conf");
    fs::write(root.join("conf").join("base.config"), "process {}\n").expect("write base");
    fs::write(
        root.join("conf").join("profiles").join("slurm.config"),
        "process.executor = 'slurm'\n",
    )
    .expect("write slurm");
    fs::create_dir_all(root.join("assets")).expect("create assets");
    fs::write(root.join("assets").join("samplesheet.csv"), "sample\n").expect("write asset");
    // Bundled next to the templates but never copied by init.
    fs::write(root.join("main.nf"), "workflow {}\n").expect("write main.nf");
    base
}

fn top_level_entries(root: &Path) -> BTreeSet<String> {
    fs::read_dir(root)
        .expect("read dest")
        .map(|entry| entry.expect("entry").file_name().to_string_lossy().into_owned())
        .collect()
}

#[test]
fn init_creates_exactly_the_documented_paths() {
    let base = fake_install();
    let dest = tempfile::tempdir().expect("create dest");

    let written = init_working_dir(base.path(), dest.path()).expect("init");

    assert_eq!(
        written,
        vec![
            dest.path().join("nextflow.config"),
            dest.path().join("conf"),
            dest.path().join("assets"),
        ]
    );
    let expected: BTreeSet<String> = ["nextflow.config", "conf", "assets", "log"]
        .iter()
        .map(|name| name.to_string())
        .collect();
    assert_eq!(top_level_entries(dest.path()), expected);
    assert!(dest.path().join("log").is_dir());
    assert_eq!(
        fs::read_to_string(dest.path().join("conf/profiles/slurm.config")).expect("read"),
        "process.executor = 'slurm'\n"
    );
    assert!(dest.path().join("assets/samplesheet.csv").is_file());
}

#[test]
fn init_twice_succeeds_and_keeps_log_contents() {
    let base = fake_install();
    let dest = tempfile::tempdir().expect("create dest");

    init_working_dir(base.path(), dest.path()).expect("first init");
    let log_file = dest.path().join("log").join("run.log");
    fs::write(&log_file, "previous run\n").expect("write log");

    init_working_dir(base.path(), dest.path()).expect("second init");

    assert_eq!(fs::read_to_string(&log_file).expect("read log"), "previous run\n");
}

#[test]
fn init_overwrites_templates_and_keeps_user_files() {
    let base = fake_install();
    let dest = tempfile::tempdir().expect("create dest");
    fs::write(dest.path().join("nextflow.config"), "edited\n").expect("write edited");
    fs::create_dir_all(dest.path().join("conf")).expect("create conf");
    fs::write(dest.path().join("conf").join("mine.config"), "mine\n").expect("write mine");

    init_working_dir(base.path(), dest.path()).expect("init");

    assert_eq!(
        fs::read_to_string(dest.path().join("nextflow.config")).expect("read"),
        "includeConfig 'conf/base.config'\n"
    );
    assert!(dest.path().join("conf").join("mine.config").is_file());
}

#[test]
fn missing_template_is_surfaced_with_partial_copy() {
    let base = fake_install();
    fs::remove_dir_all(base.path().join("assets")).expect("remove assets");
    let dest = tempfile::tempdir().expect("create dest");

    let err = init_working_dir(base.path(), dest.path()).expect_err("assets missing");

    assert!(err.to_string().contains("assets"), "unexpected error: {err}");
    assert!(dest.path().join("nextflow.config").is_file());
    assert!(dest.path().join("conf").is_dir());
    assert!(!dest.path().join("log").exists());
}

#[test]
fn log_path_occupied_by_a_file_is_an_error() {
    let base = fake_install();
    let dest = tempfile::tempdir().expect("create dest");
    fs::write(dest.path().join("log"), "not a dir").expect("write log file");

    assert!(init_working_dir(base.path(), dest.path()).is_err());
}

#[test]
fn bundled_templates_are_complete() {
    let base = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let dest = tempfile::tempdir().expect("create dest");

    init_working_dir(&base, dest.path()).expect("init from bundled templates");

    assert!(dest.path().join("nextflow.config").is_file());
    assert!(dest.path().join("conf").is_dir());
    assert!(dest.path().join("assets").is_dir());
    assert!(dest.path().join("log").is_dir());
}

#[test]
fn init_inside_install_dir_is_refused_without_truncating() {
    let base = fake_install();

    let err = init_working_dir(base.path(), base.path()).expect_err("same location");

    assert!(err.to_string().contains("same file"), "unexpected error: {err}");
    assert_eq!(
        fs::read_to_string(base.path().join("nextflow.config")).expect("read config"),
        "includeConfig 'conf/base.config'\n"
    );
    assert_eq!(
        fs::read_to_string(base.path().join("assets/samplesheet.csv")).expect("read asset"),
        "sample\n"
    );
    assert!(!base.path().join("log").exists());
}

#[test]
fn init_into_a_template_dir_is_refused_before_copying() {
    let base = fake_install();
    let dest = base.path().join("assets");

    let err = init_working_dir(base.path(), &dest).expect_err("nested destination");

    assert!(err.to_string().contains("into itself"), "unexpected error: {err}");
    assert!(!dest.join("nextflow.config").exists());
    assert!(!dest.join("assets").exists());
}
