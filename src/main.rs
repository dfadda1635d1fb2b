use chunker::cli::{Args, Command};

fn main() {
    let args = Args::parse_args();
    let command = Command::from_args(args);
    std::process::exit(command.run());
}
