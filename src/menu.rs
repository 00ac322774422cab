// 🖥️ Interactive Menu - line-based loop over any reader/writer
// The engine does the work; this module only prompts, dispatches and prints.

use crate::batch::{read_until_blank, validate_batch_as_of, BatchReport};
use crate::birthdate::current_year;
use crate::error::CompletionError;
use crate::identifier::{complete_as_of, Completion, IdInfo, ID_LEN};
use crate::region::RegionDirectory;
use crate::validator::check_id;
use std::io::{self, BufRead, Write};

const RULE_WIDTH: usize = 50;

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

// ============================================================================
// RENDERING
// ============================================================================

/// Print the decoded fields of an ID number
pub fn write_info<W: Write>(out: &mut W, info: &IdInfo) -> io::Result<()> {
    writeln!(out, "\n{}", rule())?;
    writeln!(out, "身份证详细信息")?;
    writeln!(out, "{}", rule())?;
    writeln!(out, "📍 居住地: {}", info.region.name)?;

    match (&info.birthdate, &info.birthdate_error) {
        (Some(date), _) => {
            writeln!(out, "🎂 出生日期: {}", date)?;
            if let Some(zodiac) = info.zodiac {
                writeln!(out, "🐉 生肖: {}", zodiac.label())?;
            }
            if let Some(constellation) = info.constellation {
                writeln!(out, "✨ 星座: {}", constellation.label())?;
            }
        }
        (None, Some(err)) => writeln!(out, "❌ 出生日期: {}", err)?,
        (None, None) => {}
    }

    writeln!(out, "👤 性别: {}", info.gender.label())?;
    writeln!(out, "🔢 顺序号: {}", info.sequence)?;
    writeln!(out, "✅ 校验码: {}", info.check_char)?;

    if let Some(age) = info.age {
        writeln!(out, "📅 年龄: 约{}岁", age)?;
    }

    writeln!(out, "{}", rule())
}

/// Print a completed number and the short info the completion screen shows
pub fn write_completion<W: Write>(out: &mut W, done: &Completion) -> io::Result<()> {
    writeln!(out, "✅ 身份证第18位: {}", done.check_char)?;
    writeln!(out, "📝 完整身份证号码: {}", done.full)?;
    writeln!(out, "📍 居住地: {}", done.info.region.name)?;

    if let (Some(zodiac), Some(constellation)) = (done.info.zodiac, done.info.constellation) {
        writeln!(out, "🐉 生肖: {}", zodiac.label())?;
        writeln!(out, "✨ 星座: {}", constellation.label())?;
    }

    Ok(())
}

/// Completion on success, the input error otherwise
pub fn write_completion_outcome<W: Write>(
    out: &mut W,
    outcome: &Result<Completion, CompletionError>,
) -> io::Result<()> {
    match outcome {
        Ok(done) => write_completion(out, done),
        Err(e) => writeln!(out, "❌ 错误: {}", e),
    }
}

/// Numbered per-line verdicts followed by the summary line
pub fn write_batch_report<W: Write>(out: &mut W, report: &BatchReport) -> io::Result<()> {
    for entry in &report.entries {
        let status = if entry.verdict.is_valid() { "✅" } else { "❌" };
        writeln!(out, "{}. {} {}: {}", entry.index, status, entry.input, entry.verdict.message())?;
    }
    writeln!(out, "\n📈 {}", report.summary())
}

// ============================================================================
// INTERRUPT
// ============================================================================

/// Ctrl-C ends the program normally
pub const INTERRUPT_EXIT_CODE: i32 = 0;

/// Body of the Ctrl-C handler: say goodbye and hand back the exit code
pub fn write_interrupted<W: Write>(out: &mut W) -> i32 {
    // Output is best effort; the process exits either way
    let _ = writeln!(out, "\n👋 程序被用户中断");
    let _ = out.flush();
    INTERRUPT_EXIT_CODE
}

// ============================================================================
// MENU LOOP
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Validate,
    Complete,
    Batch,
    Exit,
}

impl Choice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Choice::Validate),
            "2" => Some(Choice::Complete),
            "3" => Some(Choice::Batch),
            "4" => Some(Choice::Exit),
            _ => None,
        }
    }
}

pub struct Menu<'a, R, W> {
    regions: &'a RegionDirectory,
    input: R,
    out: W,
    current_year: i32,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(regions: &'a RegionDirectory, input: R, out: W) -> Self {
        Menu {
            regions,
            input,
            out,
            current_year: current_year(),
        }
    }

    /// Pin the year used for birthdate range checks and ages
    pub fn with_current_year(mut self, year: i32) -> Self {
        self.current_year = year;
        self
    }

    /// Run until the user picks exit or input ends
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.out, "🚀 身份证号码检测器")?;
        writeln!(self.out, "📋 功能: 验证身份证号码、提取信息、计算校验码")?;

        loop {
            self.print_menu()?;

            let Some(line) = self.prompt("请输入选项 (1/2/3/4): ")? else {
                writeln!(self.out)?;
                break;
            };

            match Choice::parse(&line) {
                Some(Choice::Validate) => self.validate_one()?,
                Some(Choice::Complete) => self.complete_prefix()?,
                Some(Choice::Batch) => self.batch()?,
                Some(Choice::Exit) => break,
                None => writeln!(self.out, "❌ 无效选择，请重新输入")?,
            }
        }

        writeln!(self.out, "👋 感谢使用，再见！")?;
        self.out.flush()
    }

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.out, "\n{}", rule())?;
        writeln!(self.out, "请选择操作:")?;
        writeln!(self.out, "1. 📋 验证完整身份证号码")?;
        writeln!(self.out, "2. 🧮 根据前17位计算校验码")?;
        writeln!(self.out, "3. 📊 批量验证身份证号码")?;
        writeln!(self.out, "4. ❌ 退出程序")?;
        writeln!(self.out, "{}", rule())
    }

    /// Prompt and read one trimmed line; `None` at end of input
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.out, "{}", text)?;
        self.out.flush()?;

        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(buf.trim().to_string()))
    }

    fn validate_one(&mut self) -> io::Result<()> {
        let Some(id_input) = self.prompt("请输入18位身份证号码: ")? else {
            return Ok(());
        };

        if id_input.chars().count() != ID_LEN {
            return writeln!(self.out, "❌ 错误: 身份证号码必须是18位");
        }

        match check_id(&id_input, self.regions, self.current_year) {
            Ok(id) => {
                writeln!(self.out, "✅ 身份证号码有效")?;
                let info = id.info_as_of(self.regions, self.current_year);
                write_info(&mut self.out, &info)
            }
            Err(reason) => writeln!(self.out, "❌ {}", reason),
        }
    }

    fn complete_prefix(&mut self) -> io::Result<()> {
        let Some(prefix) = self.prompt("请输入身份证前17位: ")? else {
            return Ok(());
        };

        let outcome = complete_as_of(&prefix, self.regions, self.current_year);
        write_completion_outcome(&mut self.out, &outcome)
    }

    fn batch(&mut self) -> io::Result<()> {
        writeln!(self.out, "📊 批量验证模式")?;
        writeln!(self.out, "请输入多个身份证号码（每行一个），输入空行结束:")?;
        self.out.flush()?;

        let ids = read_until_blank(&mut self.input)?;
        let report = validate_batch_as_of(&ids, self.regions, self.current_year);
        write_batch_report(&mut self.out, &report)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_script(script: &str) -> String {
        let regions = RegionDirectory::builtin();
        let mut out = Vec::new();
        Menu::new(&regions, Cursor::new(script.to_string()), &mut out)
            .with_current_year(2026)
            .run()
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_choice_parse() {
        assert_eq!(Choice::parse(" 1 "), Some(Choice::Validate));
        assert_eq!(Choice::parse("4"), Some(Choice::Exit));
        assert_eq!(Choice::parse("5"), None);
        assert_eq!(Choice::parse(""), None);
    }

    #[test]
    fn test_exit_immediately() {
        let out = run_script("4\n");
        assert!(out.contains("身份证号码检测器"));
        assert!(out.contains("感谢使用，再见"));
    }

    #[test]
    fn test_eof_exits_cleanly() {
        let out = run_script("");
        assert!(out.contains("感谢使用，再见"));
    }

    #[test]
    fn test_validate_valid_number_shows_info() {
        let out = run_script("1\n110101199003078697\n4\n");
        assert!(out.contains("✅ 身份证号码有效"));
        assert!(out.contains("📍 居住地: 北京市东城区"));
        assert!(out.contains("🎂 出生日期: 1990年03月07日"));
        assert!(out.contains("🐉 生肖: 马"));
        assert!(out.contains("✨ 星座: 双鱼座"));
        assert!(out.contains("👤 性别: 男"));
        assert!(out.contains("🔢 顺序号: 869"));
        assert!(out.contains("✅ 校验码: 7"));
        assert!(out.contains("📅 年龄: 约36岁"));
    }

    #[test]
    fn test_validate_invalid_number_shows_reason() {
        let out = run_script("1\n110101199003078690\n4\n");
        assert!(out.contains("❌ 校验码错误，应为'7'"));
        assert!(!out.contains("身份证详细信息"));
    }

    #[test]
    fn test_validate_wrong_length_rejected_up_front() {
        let out = run_script("1\n12345\n4\n");
        assert!(out.contains("❌ 错误: 身份证号码必须是18位"));
    }

    #[test]
    fn test_complete_prefix() {
        let out = run_script("2\n11010119900307869\n4\n");
        assert!(out.contains("✅ 身份证第18位: 7"));
        assert!(out.contains("📝 完整身份证号码: 110101199003078697"));
        assert!(out.contains("📍 居住地: 北京市东城区"));
        assert!(out.contains("🐉 生肖: 马"));
    }

    #[test]
    fn test_complete_skips_zodiac_for_bad_date() {
        let out = run_script("2\n11010119730229001\n4\n");
        assert!(out.contains("📝 完整身份证号码: 110101197302290015"));
        assert!(!out.contains("生肖"));
    }

    #[test]
    fn test_complete_rejects_bad_prefix() {
        let out = run_script("2\n1234\n4\n");
        assert!(out.contains("❌ 错误: 前17位必须是17位数字"));
    }

    #[test]
    fn test_batch_mode() {
        let out = run_script("3\n110101199003078697\nbad\n110101197202290018\n\n4\n");
        assert!(out.contains("1. ✅ 110101199003078697: 身份证号码有效"));
        assert!(out.contains("2. ❌ bad: 身份证号码长度不正确"));
        assert!(out.contains("3. ✅ 110101197202290018"));
        assert!(out.contains("验证结果: 2个有效 / 3个总数"));
        assert!(out.contains("感谢使用，再见"));
    }

    #[test]
    fn test_unknown_choice_reprompts() {
        let out = run_script("9\n4\n");
        assert!(out.contains("❌ 无效选择，请重新输入"));
        assert_eq!(out.matches("请选择操作").count(), 2);
    }

    #[test]
    fn test_interrupt_prints_goodbye_and_exits_zero() {
        let mut out = Vec::new();
        let code = write_interrupted(&mut out);
        assert_eq!(code, 0);
        assert_eq!(String::from_utf8(out).unwrap(), "\n👋 程序被用户中断\n");
    }

    #[test]
    fn test_completion_outcome_reports_input_error() {
        let regions = RegionDirectory::builtin();
        let mut out = Vec::new();
        write_completion_outcome(&mut out, &complete_as_of("12345", &regions, 2026)).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert_eq!(out, "❌ 错误: 前17位必须是17位数字\n");
        assert!(!out.contains("程序发生错误"));
    }

    #[test]
    fn test_write_info_with_bad_birthdate() {
        let regions = RegionDirectory::builtin();
        let id: crate::identifier::IdNumber = "110101197302290015".parse().unwrap();
        let mut out = Vec::new();
        write_info(&mut out, &id.info_as_of(&regions, 2026)).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("❌ 出生日期: 1973年不是闰年，2月最多28天"));
        assert!(!out.contains("年龄"));
    }
}
