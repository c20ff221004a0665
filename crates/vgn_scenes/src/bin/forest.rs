use std::process::ExitCode;

use vgn_scenes::DemoKind;

fn main() -> ExitCode {
    vgn_scenes::app::run(DemoKind::Forest)
}
