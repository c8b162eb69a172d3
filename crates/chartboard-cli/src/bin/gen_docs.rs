//! Binary that emits command-line options markdown to stdout.

fn main() {
    print!("{}", chartboard_cli::render_options_markdown());
}
