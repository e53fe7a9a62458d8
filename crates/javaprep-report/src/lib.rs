//! javaprep-report: Render finished interviews for sharing.

pub mod html;
