use std::path::Path;

use console::Style;
use startrail_core::capture::CaptureConfig;
use startrail_core::pipeline::config::StarTrailConfig;
use startrail_core::pipeline::StackSummary;

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

fn print_title(s: &Styles, title: &str) {
    println!();
    println!("  {}", s.title.apply_to(title));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(title.chars().count())));
    println!();
}

pub fn print_stack_config(config: &StarTrailConfig) {
    let s = Styles::new();
    print_title(&s, "Star Trail Stack");

    println!(
        "  {:<14}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(config.input_dir.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(config.output.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Extensions"),
        s.value.apply_to(config.extensions.join(", "))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("JPEG quality"),
        s.value.apply_to(config.jpeg_quality)
    );
    if config.parallel {
        println!("  {:<14}{}", s.label.apply_to("Mode"), s.value.apply_to("parallel"));
    } else {
        println!("  {:<14}{}", s.label.apply_to("Mode"), s.disabled.apply_to("sequential"));
    }
    println!();
}

pub fn print_stack_result(summary: &StackSummary) {
    let s = Styles::new();
    println!(
        "  Stacked {} image(s) at {} into {}",
        s.value.apply_to(summary.frames),
        s.value.apply_to(summary.dimensions),
        s.path.apply_to(summary.output.display())
    );
}

pub fn print_capture_config(config: &CaptureConfig, session: &Path) {
    let s = Styles::new();
    print_title(&s, "Timelapse Capture");

    println!(
        "  {:<14}{}",
        s.label.apply_to("Session"),
        s.path.apply_to(session.display())
    );
    let iso = if config.iso == 0 {
        "auto".to_string()
    } else {
        config.iso.to_string()
    };
    println!("  {:<14}{}", s.label.apply_to("ISO"), s.value.apply_to(iso));
    println!(
        "  {:<14}{}",
        s.label.apply_to("Shutter"),
        s.value.apply_to(format!("{} us", config.shutter_us))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Brightness"),
        s.value.apply_to(config.brightness)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Resolution"),
        s.value.apply_to(format!("{}x{}", config.width, config.height))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Interval"),
        s.value.apply_to(format!("{} s", config.interval_secs))
    );
    match config.max_frames {
        Some(n) => println!("  {:<14}{}", s.label.apply_to("Frames"), s.value.apply_to(n)),
        None => println!(
            "  {:<14}{}",
            s.label.apply_to("Frames"),
            s.disabled.apply_to("until interrupted")
        ),
    }
    println!();
}
