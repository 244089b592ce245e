use crate::report::Report;

/// Loading placeholder bar shown in place of the composer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SkeletonBar {
    pub height: f64,
    pub animate: bool,
}

impl Default for SkeletonBar {
    fn default() -> Self {
        Self {
            height: 8.0,
            animate: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Footer {
    Composer,
    ArchivedSkeleton(SkeletonBar),
}

impl Footer {
    pub fn for_report(report: &Report, animate: bool) -> Self {
        if report.is_archived {
            Footer::ArchivedSkeleton(SkeletonBar {
                animate,
                ..SkeletonBar::default()
            })
        } else {
            Footer::Composer
        }
    }
}
