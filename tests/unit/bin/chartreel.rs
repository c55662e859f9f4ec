use super::*;

const INPUTS: [&str; 6] = [
    "--settings",
    "s.json",
    "--positions",
    "p.json",
    "--chart",
    "c.json",
];

fn render_args(extra: &[&str]) -> RenderArgs {
    let argv = ["chartreel", "render"]
        .into_iter()
        .chain(INPUTS)
        .chain(extra.iter().copied());
    match Cli::try_parse_from(argv).unwrap().cmd {
        Command::Render(args) => args,
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn render_overwrites_by_default() {
    let args = render_args(&[]);
    assert!(!args.no_overwrite);
    assert_eq!(args.jobs, 1);
}

#[test]
fn no_overwrite_flag_is_reachable() {
    let args = render_args(&["--no-overwrite", "--jobs", "3"]);
    assert!(args.no_overwrite);
    assert_eq!(args.jobs, 3);
}
