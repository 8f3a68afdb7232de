//! Renders a [`ParameterSet`] into the renderer's command-line grammar.

use crate::core::models::params::ParameterSet;

pub const FLAG_ROOT: &str = "--root";
pub const FLAG_OUT: &str = "--out";
pub const FLAG_FPS: &str = "--fps";
pub const FLAG_WIDTH: &str = "--width";
pub const FLAG_LABEL: &str = "--label";
pub const FLAG_NO_TIME: &str = "--no-time";
pub const FLAG_CODEC: &str = "--codec";
pub const FLAG_OVERWRITE: &str = "--overwrite";
pub const FLAG_TIME_START: &str = "--time-start";
pub const FLAG_TIME_END: &str = "--time-end";

/// Builds the renderer's argument vector in its fixed flag order.
///
/// Switches and time bounds are emitted only when set; every other flag is
/// always present.
pub fn build_argument_list(params: &ParameterSet) -> Vec<String> {
    let mut args = vec![
        FLAG_ROOT.to_string(),
        params.working_path().to_string_lossy().into_owned(),
        FLAG_OUT.to_string(),
        params.output_path().to_string_lossy().into_owned(),
        FLAG_FPS.to_string(),
        params.fps().to_string(),
        FLAG_WIDTH.to_string(),
        params.width().to_string(),
        FLAG_LABEL.to_string(),
        params.label().to_string(),
    ];

    if !params.show_timestamp_overlay() {
        args.push(FLAG_NO_TIME.to_string());
    }

    args.push(FLAG_CODEC.to_string());
    args.push(params.codec().to_string());

    if params.overwrite_existing() {
        args.push(FLAG_OVERWRITE.to_string());
    }

    let window = params.time_window();
    if let Some(start) = &window.start {
        args.push(FLAG_TIME_START.to_string());
        args.push(start.clone());
    }
    if let Some(end) = &window.end {
        args.push(FLAG_TIME_END.to_string());
        args.push(end.clone());
    }

    args
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::params::{FrameRate, TimeWindow};
    use std::path::PathBuf;

    const ROOT: &str = r"D:\Shoots\2024-06-01";

    fn params(
        overwrite: bool,
        overlay: bool,
        fps: FrameRate,
        window: TimeWindow,
    ) -> ParameterSet {
        ParameterSet::builder()
            .root_path(PathBuf::from(ROOT))
            .fps(fps)
            .time_window(window)
            .overwrite_existing(overwrite)
            .show_timestamp_overlay(overlay)
            .build()
            .unwrap()
    }

    #[test]
    fn all_optional_flags_in_documented_order() {
        let set = params(
            true,
            false,
            FrameRate::Value(12),
            TimeWindow::new(None, Some("18:30".into())),
        );

        assert_eq!(
            build_argument_list(&set),
            vec![
                "--root",
                ROOT,
                "--out",
                r"D:\Shoots\2024-06-01\_Timelapse",
                "--fps",
                "12",
                "--width",
                "1280",
                "--label",
                "2024-06-01",
                "--no-time",
                "--codec",
                "mp4v",
                "--overwrite",
                "--time-end",
                "18:30",
            ]
        );
    }

    #[test]
    fn defaults_omit_every_optional_flag() {
        let set = params(false, true, FrameRate::default(), TimeWindow::unbounded());
        let args = build_argument_list(&set);

        assert_eq!(args.len(), 12);
        for flag in [FLAG_NO_TIME, FLAG_OVERWRITE, FLAG_TIME_START, FLAG_TIME_END] {
            assert!(!args.iter().any(|a| a == flag), "{flag} should be absent");
        }
        assert_eq!(args[4..6], ["--fps", "24"]);
    }

    #[test]
    fn time_bounds_are_forwarded_literally() {
        let set = params(
            false,
            true,
            FrameRate::default(),
            TimeWindow::new(Some("6:05".into()), Some("19:45".into())),
        );
        let args = build_argument_list(&set);

        assert_eq!(
            args[args.len() - 4..],
            ["--time-start", "6:05", "--time-end", "19:45"]
        );
    }

    #[test]
    fn verbatim_frame_rate_is_forwarded_unchanged() {
        let set = params(
            false,
            true,
            FrameRate::Verbatim("29.97".into()),
            TimeWindow::unbounded(),
        );
        let args = build_argument_list(&set);
        assert_eq!(args[5], "29.97");
    }

    #[test]
    fn root_flag_uses_working_path() {
        let set = ParameterSet::builder()
            .root_path(PathBuf::from(r"\\?\UNC\nas\cams\north"))
            .working_path(PathBuf::from(r"\\nas\cams\north"))
            .fps(FrameRate::default())
            .overwrite_existing(false)
            .show_timestamp_overlay(true)
            .build()
            .unwrap();
        let args = build_argument_list(&set);

        assert_eq!(args[1], r"\\nas\cams\north");
        assert_eq!(args[3], r"\\nas\cams\north\_Timelapse");
        assert_eq!(args[9], "north");
    }
}
