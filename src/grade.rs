/// Converts an average mark (0–100) into a letter grade.
///
/// | Range       | Grade |
/// |-------------|-------|
/// | >= 90       | A+    |
/// | >= 80       | A     |
/// | >= 70       | B     |
/// | >= 60       | C     |
/// | >= 50       | D     |
/// | < 50        | F     |
///
/// Boundaries are inclusive on the lower bound of each band, evaluated
/// top-down with first match winning.
pub fn grade(avg: f64) -> String {
    match avg {
        a if a >= 90.0 => "A+".into(),
        a if a >= 80.0 => "A".into(),
        a if a >= 70.0 => "B".into(),
        a if a >= 60.0 => "C".into(),
        a if a >= 50.0 => "D".into(),
        _ => "F".into(),
    }
}
