use assert_cmd::Command;

pub fn timegrid_cmd() -> Command {
    let mut cmd = Command::cargo_bin("timegrid").unwrap();
    cmd.env_remove("TIMEGRID_ROOT");
    cmd.env_remove("TIMEGRID_LOG");
    cmd
}
