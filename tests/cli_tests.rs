use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{init_cli_db, setup_test_db, tl};

#[test]
fn test_init_creates_database() {
    let db_path = setup_test_db("cli_init");

    tl().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    assert!(std::path::Path::new(&db_path).exists());
}

#[test]
fn test_detached_start_is_paused_on_next_run() {
    let db_path = setup_test_db("cli_detached_start");
    init_cli_db(&db_path);

    tl().args(["--db", &db_path, "start", "write docs", "-p", "Acme", "--detach"])
        .assert()
        .success()
        .stdout(contains("Started 'write docs [Acme]'"));

    tl().args(["--db", &db_path, "status"])
        .assert()
        .success()
        .stdout(contains("Paused:").and(contains("write docs")));

    tl().args(["--db", &db_path, "status", "--json"])
        .assert()
        .success()
        .stdout(contains("\"status\": \"paused\"").and(contains("\"project\": \"Acme\"")));

    // a second start is refused while a task is open
    tl().args(["--db", &db_path, "start", "other", "--detach"])
        .assert()
        .failure()
        .stderr(contains("Cannot start a task while the session is paused"));
}

#[test]
fn test_stop_completes_task_and_lists_it() {
    let db_path = setup_test_db("cli_stop_list");
    init_cli_db(&db_path);

    tl().args(["--db", &db_path, "start", "review PR", "--detach"])
        .assert()
        .success();

    tl().args(["--db", &db_path, "stop"])
        .assert()
        .success()
        .stdout(contains("Stopped 'review PR'"));

    tl().args(["--db", &db_path, "status"])
        .assert()
        .success()
        .stdout(contains("No active task."));

    tl().args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains("review PR").and(contains("open").not()));

    tl().args(["--db", &db_path, "list", "--json"])
        .assert()
        .success()
        .stdout(contains("\"completed\": true"));

    tl().args(["--db", &db_path, "stop"])
        .assert()
        .failure()
        .stderr(contains("Cannot stop while the session is idle"));
}

#[test]
fn test_resume_and_restart_detached() {
    let db_path = setup_test_db("cli_resume_restart");
    init_cli_db(&db_path);

    tl().args(["--db", &db_path, "resume", "--detach"])
        .assert()
        .failure()
        .stderr(contains("Cannot resume while the session is idle"));

    tl().args(["--db", &db_path, "start", "a", "--detach"])
        .assert()
        .success();

    tl().args(["--db", &db_path, "resume", "--detach"])
        .assert()
        .success()
        .stdout(contains("Resumed 'a'"));

    tl().args(["--db", &db_path, "restart", "b", "--detach"])
        .assert()
        .success()
        .stdout(contains("Stopped 'a' first.").and(contains("Running 'b'")));

    tl().args(["--db", &db_path, "list", "--all"])
        .assert()
        .success()
        .stdout(contains("a").and(contains("b")).and(contains("open")));
}

#[test]
fn test_del_task() {
    let db_path = setup_test_db("cli_del");
    init_cli_db(&db_path);

    tl().args(["--db", &db_path, "start", "throwaway", "--detach"])
        .assert()
        .success();

    tl().args(["--db", &db_path, "del", "1", "--yes"])
        .assert()
        .failure()
        .stderr(contains("still open"));

    tl().args(["--db", &db_path, "stop"]).assert().success();

    tl().args(["--db", &db_path, "del", "1", "--yes"])
        .assert()
        .success()
        .stdout(contains("Task #1 'throwaway' has been deleted."));

    tl().args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains("No tasks recorded yet."));

    tl().args(["--db", &db_path, "del", "1", "--yes"])
        .assert()
        .failure()
        .stderr(contains("Task not found: 1"));
}

#[test]
fn test_projects() {
    let db_path = setup_test_db("cli_projects");
    init_cli_db(&db_path);

    tl().args(["--db", &db_path, "project", "add", "Acme", "--color", "#ff8800"])
        .assert()
        .success()
        .stdout(contains("Project 'Acme' created (#1)."));

    tl().args(["--db", &db_path, "project", "add", "Acme"])
        .assert()
        .failure()
        .stderr(contains("already exists"));

    tl().args(["--db", &db_path, "project", "edit", "1", "--name", "Acme Corp"])
        .assert()
        .success();

    tl().args(["--db", &db_path, "project", "list"])
        .assert()
        .success()
        .stdout(contains("Acme Corp"));

    tl().args(["--db", &db_path, "project", "del", "1", "--yes"])
        .assert()
        .success();

    tl().args(["--db", &db_path, "project", "list"])
        .assert()
        .success()
        .stdout(contains("No projects yet."));
}

#[test]
fn test_log_records_operations() {
    let db_path = setup_test_db("cli_log");
    init_cli_db(&db_path);

    tl().args(["--db", &db_path, "start", "logged", "--detach"])
        .assert()
        .success();
    tl().args(["--db", &db_path, "stop"]).assert().success();

    tl().args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("start").and(contains("stop")).and(contains("init")));
}

#[test]
fn test_db_repair_and_info() {
    let db_path = setup_test_db("cli_db");
    init_cli_db(&db_path);

    tl().args(["--db", &db_path, "db", "--repair"])
        .assert()
        .success();

    tl().args(["--db", &db_path, "db", "--info"])
        .assert()
        .success()
        .stdout(contains("Tasks"));
}

#[test]
fn test_config_print_shows_engine_settings() {
    let db_path = setup_test_db("cli_config");

    tl().args(["--db", &db_path, "config", "--print"])
        .assert()
        .success()
        .stdout(
            contains("Current configuration")
                .and(contains("checkpoint_interval_secs"))
                .and(contains(db_path.as_str())),
        );
}
