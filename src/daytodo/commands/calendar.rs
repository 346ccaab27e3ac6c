use crate::calendar::CalendarNavigator;
use crate::commands::CmdResult;
use crate::date::YearMonth;
use crate::error::Result;

/// Positions the navigator (an explicit month first, then `delta` months from
/// there) and returns the grid under the cursor.
pub fn run(
    navigator: &mut CalendarNavigator,
    month: Option<YearMonth>,
    delta: i32,
) -> Result<CmdResult> {
    if let Some(month) = month {
        navigator.show_month(month);
    }
    if delta != 0 {
        navigator.advance_month(delta)?;
    }
    let grid = navigator.current_grid()?;
    Ok(CmdResult::default()
        .with_date(navigator.selected())
        .with_grid(grid))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::DateKey;

    fn nav() -> CalendarNavigator {
        CalendarNavigator::new("2024-03-15".parse::<DateKey>().unwrap())
    }

    #[test]
    fn defaults_to_current_month() {
        let mut nav = nav();
        let grid = run(&mut nav, None, 0).unwrap().grid.unwrap();
        assert_eq!(grid.month, YearMonth::new(2024, 3).unwrap());
        assert_eq!(grid.days().filter(|c| c.is_today).count(), 1);
    }

    #[test]
    fn explicit_month_then_offset() {
        let mut nav = nav();
        let month = YearMonth::new(2023, 12).unwrap();
        let grid = run(&mut nav, Some(month), 1).unwrap().grid.unwrap();
        assert_eq!(grid.month, YearMonth::new(2024, 1).unwrap());
        assert_eq!(grid.days().count(), 31);
    }

    #[test]
    fn out_of_range_offset_fails() {
        let mut nav = nav();
        let month = YearMonth::new(9999, 12).unwrap();
        assert!(run(&mut nav, Some(month), 1).is_err());
        assert_eq!(nav.cursor(), month);
    }
}
