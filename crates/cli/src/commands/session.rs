use std::{
    io::{self, BufRead, Write},
    path::Path,
    str::FromStr,
    thread,
    time::Duration,
};

use anyhow::bail;
use chrono::Utc;
use setflow_app::Settings;
use setflow_domain::{CountdownToggle, Day, DayID, Plan, SessionController, Transition};

use crate::{
    render,
    terminal::{Terminal, Ticker},
};

const HELP: &str = "\
done, d       complete a set of the active exercise
timer, t      start or stop the timer of a time-based exercise
skip, s       skip the current rest
wait, w       wait until the running rest or timer has finished
day <id>      switch to another day, discarding the progress
days          list the days of the plan
status        show the card of the current day
log           show recent log messages
help, h       show this help
quit, q       leave the session";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Done,
    Timer,
    Skip,
    Wait,
    Day(DayID),
    Days,
    Status,
    Log,
    Help,
    Quit,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseCommandError {
    #[error("Missing day, e.g. `day day1`")]
    MissingDay,
    #[error("Unknown command `{0}`, type `help` for a list of commands")]
    Unknown(String),
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let Some(command) = words.next() else {
            return Ok(Command::Status);
        };
        match command.to_lowercase().as_str() {
            "done" | "d" => Ok(Command::Done),
            "timer" | "t" => Ok(Command::Timer),
            "skip" | "s" => Ok(Command::Skip),
            "wait" | "w" => Ok(Command::Wait),
            "day" => words
                .next()
                .map(|id| Command::Day(id.into()))
                .ok_or(ParseCommandError::MissingDay),
            "days" => Ok(Command::Days),
            "status" => Ok(Command::Status),
            "log" => Ok(Command::Log),
            "help" | "h" | "?" => Ok(Command::Help),
            "quit" | "q" | "exit" => Ok(Command::Quit),
            _ => Err(ParseCommandError::Unknown(command.to_string())),
        }
    }
}

/// One line about a completed set, e.g. `A1 set 1/2 -> A2`.
fn describe(controller: &SessionController<Terminal>, unit: usize, transition: Transition) -> String {
    let session = controller.session();
    let (code, done, total) = session
        .unit(unit)
        .map(|u| (u.code().to_string(), u.completed_sets(), u.total_sets()))
        .unwrap_or_default();
    let next = transition
        .next_active
        .and_then(|next| session.unit(next))
        .map_or_else(|| String::from("done"), |u| u.code().to_string());
    format!("{code} set {done}/{total} -> {next}")
}

struct Repl<'a, W> {
    plan: &'a Plan,
    settings: &'a Settings,
    controller: SessionController<Terminal>,
    ticker: Ticker,
    out: W,
}

impl<'a, W: Write> Repl<'a, W> {
    fn new(plan: &'a Plan, settings: &'a Settings, day: &Day, out: W) -> Self {
        let mut controller = SessionController::new(Terminal::new(settings));
        controller.activate_day(day);
        Self {
            plan,
            settings,
            controller,
            ticker: Ticker::new(Utc::now()),
            out,
        }
    }

    fn timers_running(&self) -> bool {
        let session = self.controller.session();
        session.rest().is_some() || session.is_countdown_running()
    }

    /// Feeds the seconds passed since the last call into the controller.
    fn catch_up(&mut self) -> io::Result<()> {
        let now = Utc::now();
        if !self.timers_running() {
            self.ticker.reset(now);
            return Ok(());
        }
        let seconds = self.ticker.elapsed(now);
        self.advance(seconds)
    }

    fn advance(&mut self, seconds: u32) -> io::Result<()> {
        for _ in 0..seconds {
            if !self.timers_running() {
                break;
            }
            let countdown = self.controller.session().countdown().map(|c| c.unit);
            if let (Some(transition), Some(unit)) = (self.controller.tick(), countdown) {
                let line = describe(&self.controller, unit, transition);
                self.flush_messages()?;
                writeln!(self.out, "{line}")?;
            }
        }
        self.flush_messages()
    }

    /// Lets time pass until the timer running now has finished. A rest started by a countdown
    /// running out is not waited for.
    fn wait(&mut self, mut pass_time: impl FnMut(&mut Self) -> io::Result<()>) -> io::Result<()> {
        let countdown = self.controller.session().is_countdown_running();
        loop {
            let session = self.controller.session();
            let running = if countdown {
                session.is_countdown_running()
            } else {
                session.rest().is_some()
            };
            if !running {
                return Ok(());
            }
            pass_time(self)?;
        }
    }

    fn flush_messages(&mut self) -> io::Result<()> {
        for message in self.controller.timers_mut().take_messages() {
            writeln!(self.out, "{message}")?;
        }
        Ok(())
    }

    fn print_card(&mut self) -> io::Result<()> {
        let session = self.controller.session();
        match session.day_id().and_then(|id| self.plan.day(id)) {
            Some(day) => write!(self.out, "{}", render::day(day, session, self.settings)),
            None => writeln!(self.out, "No day selected"),
        }
    }

    /// Returns `false` once the session should end.
    fn handle(&mut self, command: Command) -> anyhow::Result<bool> {
        match command {
            Command::Done => {
                let Some(unit) = self.controller.session().active() else {
                    writeln!(self.out, "Nothing left to do")?;
                    return Ok(true);
                };
                match self.controller.record_set(unit) {
                    Some(transition) => {
                        let line = describe(&self.controller, unit, transition);
                        writeln!(self.out, "{line}")?;
                        self.flush_messages()?;
                    }
                    None => writeln!(self.out, "Stop the timer first")?,
                }
            }
            Command::Timer => {
                let Some(unit) = self.controller.session().active() else {
                    writeln!(self.out, "Nothing left to do")?;
                    return Ok(true);
                };
                if self.controller.toggle_countdown(unit) == CountdownToggle::Ignored {
                    let code = self.controller.session().units()[unit].code().to_string();
                    writeln!(self.out, "{code} is not time-based")?;
                }
                self.ticker.reset(Utc::now());
                self.flush_messages()?;
            }
            Command::Skip => {
                if self.controller.skip_rest() {
                    writeln!(self.out, "Rest skipped")?;
                } else {
                    writeln!(self.out, "No rest to skip")?;
                }
            }
            Command::Wait => self.wait(|repl| {
                thread::sleep(Duration::from_millis(250));
                repl.catch_up()
            })?,
            Command::Day(id) => match self.controller.switch_day(self.plan, &id) {
                Ok(()) => self.print_card()?,
                Err(err) => writeln!(self.out, "{err}")?,
            },
            Command::Days => write!(self.out, "{}", render::days(self.plan))?,
            Command::Status => self.print_card()?,
            Command::Log => {
                let entries = setflow_app::log::entries()?;
                for entry in entries.iter().take(20).rev() {
                    writeln!(self.out, "{} [{}] {}", entry.time, entry.level, entry.message)?;
                }
            }
            Command::Help => writeln!(self.out, "{HELP}")?,
            Command::Quit => return Ok(false),
        }
        Ok(true)
    }

    fn run(&mut self, input: impl BufRead) -> anyhow::Result<()> {
        self.print_card()?;
        self.prompt()?;
        for line in input.lines() {
            let line = line?;
            self.catch_up()?;
            let proceed = match line.parse::<Command>() {
                Ok(command) => self.handle(command)?,
                Err(err) => {
                    writeln!(self.out, "{err}")?;
                    true
                }
            };
            if !proceed {
                break;
            }
            self.prompt()?;
        }
        Ok(())
    }

    fn prompt(&mut self) -> io::Result<()> {
        let status = render::status(self.controller.session());
        if !status.is_empty() {
            writeln!(self.out, "{status}")?;
        }
        write!(self.out, "> ")?;
        self.out.flush()
    }
}

pub fn run(plan_path: &Path, settings_path: &Path, day: Option<String>) -> anyhow::Result<()> {
    let plan = super::load_plan(plan_path)?;
    let settings = super::load_settings(settings_path)?;
    let day = super::select_day(&plan, &settings, day)?;
    Repl::new(&plan, &settings, day, io::stdout().lock()).run(io::stdin().lock())?;
    println!();
    Ok(())
}

pub fn simulate(plan_path: &Path, settings_path: &Path, day: Option<String>) -> anyhow::Result<()> {
    let plan = super::load_plan(plan_path)?;
    let settings = super::load_settings(settings_path)?;
    let day = super::select_day(&plan, &settings, day)?;
    for line in trace(day, &settings)? {
        println!("{line}");
    }
    Ok(())
}

/// Completes every set of `day` in order, timed exercises by letting their timer run out.
fn trace(day: &Day, settings: &Settings) -> anyhow::Result<Vec<String>> {
    let mut controller = SessionController::new(Terminal::new(settings));
    controller.activate_day(day);

    let mut lines = vec![format!("{} ({})", day.title, day.id)];
    let mut rested = 0;
    let mut timed = 0;

    while let Some(unit) = controller.session().active() {
        while controller.session().rest().is_some() {
            controller.tick();
            rested += 1;
        }

        let Some(current) = controller.session().unit(unit) else {
            break;
        };
        let code = current.code().clone();
        let transition = if current.target().is_timed() {
            if !matches!(controller.toggle_countdown(unit), CountdownToggle::Started(_)) {
                bail!("failed to start the timer of {code}");
            }
            let mut transition = None;
            while transition.is_none() && controller.session().is_countdown_running() {
                transition = controller.tick();
                timed += 1;
            }
            transition
        } else {
            controller.record_set(unit)
        };
        let Some(transition) = transition else {
            bail!("failed to complete a set of {code}");
        };

        let rest = match controller.session().rest() {
            Some(rest) => format!("rest {} s", rest.remaining),
            None => String::from("no rest"),
        };
        lines.push(format!(
            "{} ({rest})",
            describe(&controller, unit, transition)
        ));
        controller.timers_mut().take_messages();
    }

    let session = controller.session();
    if session.units().is_empty() {
        lines.push(String::from("Nothing to do"));
    } else {
        lines.push(format!(
            "Finished {} sets: {timed} s timed work, {rested} s rest",
            session.completed_sets()
        ));
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use setflow_domain::{ExerciseDefinition, Part, Target, Time};

    use super::*;

    fn exercise(code: &str, target: Target, sets: u32, rest: u32) -> ExerciseDefinition {
        ExerciseDefinition {
            code: code.into(),
            name: code.to_lowercase(),
            alt_name: String::new(),
            note: String::new(),
            ai_query: String::new(),
            target,
            sets,
            rest: Time::from(rest),
        }
    }

    fn plan() -> Plan {
        Plan {
            days: vec![
                Day {
                    id: "day1".into(),
                    title: String::from("Upper"),
                    parts: vec![
                        Part {
                            title: String::from("Warmup"),
                            exercises: vec![
                                exercise("A1", Target::Time(3.into()), 2, 5),
                                exercise("A2", Target::Reps(15.into()), 2, 5),
                            ],
                        },
                        Part {
                            title: String::from("Main"),
                            exercises: vec![exercise("1", Target::Reps(12.into()), 2, 0)],
                        },
                    ],
                },
                Day {
                    id: "day2".into(),
                    title: String::from("Rest Day"),
                    parts: vec![],
                },
                Day {
                    id: "core".into(),
                    title: String::from("Core"),
                    parts: vec![Part {
                        title: String::from("Main"),
                        exercises: vec![exercise("P", Target::Time(2.into()), 2, 5)],
                    }],
                },
            ],
        }
    }

    fn output(repl: &Repl<'_, Vec<u8>>) -> String {
        String::from_utf8_lossy(&repl.out).to_string()
    }

    #[rstest]
    #[case("done", Command::Done)]
    #[case("d", Command::Done)]
    #[case("  T ", Command::Timer)]
    #[case("skip", Command::Skip)]
    #[case("w", Command::Wait)]
    #[case("day day2", Command::Day("day2".into()))]
    #[case("days", Command::Days)]
    #[case("", Command::Status)]
    #[case("log", Command::Log)]
    #[case("?", Command::Help)]
    #[case("exit", Command::Quit)]
    fn test_parse_command(#[case] input: &str, #[case] expected: Command) {
        assert_eq!(input.parse::<Command>(), Ok(expected));
    }

    #[rstest]
    #[case("day", ParseCommandError::MissingDay)]
    #[case("jump", ParseCommandError::Unknown(String::from("jump")))]
    fn test_parse_command_error(#[case] input: &str, #[case] expected: ParseCommandError) {
        assert_eq!(input.parse::<Command>(), Err(expected));
    }

    #[test]
    fn test_trace() {
        let plan = plan();
        assert_eq!(
            trace(&plan.days[0], &Settings::default()).unwrap(),
            vec![
                "Upper (day1)",
                "A1 set 1/2 -> A2 (no rest)",
                "A2 set 1/2 -> A1 (rest 5 s)",
                "A1 set 2/2 -> A2 (no rest)",
                "A2 set 2/2 -> 1 (rest 5 s)",
                "1 set 1/2 -> 1 (no rest)",
                "1 set 2/2 -> done (no rest)",
                "Finished 6 sets: 6 s timed work, 10 s rest",
            ]
        );
    }

    #[test]
    fn test_trace_empty_day() {
        let plan = plan();
        assert_eq!(
            trace(&plan.days[1], &Settings::default()).unwrap(),
            vec!["Rest Day (day2)", "Nothing to do"]
        );
    }

    #[test]
    fn test_repl_done_and_rest() {
        let plan = plan();
        let settings = Settings::default();
        let mut repl = Repl::new(&plan, &settings, &plan.days[0], vec![]);

        assert!(repl.handle(Command::Done).unwrap());
        assert!(repl.handle(Command::Done).unwrap());
        assert!(repl.handle(Command::Skip).unwrap());
        assert!(repl.handle(Command::Skip).unwrap());
        assert_eq!(
            output(&repl),
            "A1 set 1/2 -> A2\n\
             A2 set 1/2 -> A1\n\
             Rest for 5 s\n\
             Rest skipped\n\
             No rest to skip\n"
        );
    }

    #[test]
    fn test_repl_countdown() {
        let plan = plan();
        let settings = Settings {
            beep_volume: 0,
            ..Settings::default()
        };
        let mut repl = Repl::new(&plan, &settings, &plan.days[0], vec![]);

        assert!(repl.handle(Command::Timer).unwrap());
        assert!(repl.handle(Command::Done).unwrap());
        assert!(repl.handle(Command::Day("day2".into())).unwrap());
        repl.advance(3).unwrap();
        assert!(repl.handle(Command::Timer).unwrap());
        assert_eq!(
            output(&repl),
            "Timer started: 3 s\n\
             Stop the timer first\n\
             Stop the timer before switching the day\n\
             Time is up!\n\
             A1 set 1/2 -> A2\n\
             A2 is not time-based\n"
        );
    }

    #[test]
    fn test_repl_switch_day() {
        let plan = plan();
        let settings = Settings::default();
        let mut repl = Repl::new(&plan, &settings, &plan.days[0], vec![]);

        assert!(repl.handle(Command::Day("day3".into())).unwrap());
        assert!(repl.handle(Command::Day("day2".into())).unwrap());
        assert!(repl.handle(Command::Done).unwrap());
        assert_eq!(
            output(&repl),
            "Unknown day day3\n\
             Rest Day (day2)  0/0 sets\n\
             Nothing left to do\n"
        );
    }

    #[test]
    fn test_repl_run() {
        let plan = plan();
        let settings = Settings::default();
        let mut repl = Repl::new(&plan, &settings, &plan.days[1], vec![]);

        repl.run("jump\nquit\nstatus\n".as_bytes()).unwrap();
        assert_eq!(
            output(&repl),
            "Rest Day (day2)  0/0 sets\n\
             > Unknown command `jump`, type `help` for a list of commands\n\
             > "
        );
    }

    #[test]
    fn test_repl_wait_for_countdown_stops_before_rest() {
        let plan = plan();
        let settings = Settings {
            beep_volume: 0,
            ..Settings::default()
        };
        let mut repl = Repl::new(&plan, &settings, &plan.days[2], vec![]);

        assert!(repl.handle(Command::Timer).unwrap());
        let mut seconds = 0;
        repl.wait(|repl| {
            seconds += 1;
            repl.advance(1)
        })
        .unwrap();
        assert_eq!(seconds, 2);
        assert_eq!(repl.controller.session().rest().map(|r| r.remaining), Some(5.into()));

        let mut seconds = 0;
        repl.wait(|repl| {
            seconds += 1;
            repl.advance(1)
        })
        .unwrap();
        assert_eq!(seconds, 5);
        assert_eq!(repl.controller.session().rest(), None);
        assert_eq!(
            output(&repl),
            "Timer started: 2 s\n\
             Time is up!\n\
             Rest for 5 s\n\
             P set 1/2 -> P\n\
             Rest is over, next set!\n"
        );
    }

    #[test]
    fn test_repl_wait_without_timers() {
        let plan = plan();
        let settings = Settings::default();
        let mut repl = Repl::new(&plan, &settings, &plan.days[2], vec![]);

        repl.wait(|_| panic!("nothing to wait for")).unwrap();
    }

    #[test]
    fn test_repl_run_reports_finished_day_once() {
        let plan = plan();
        let settings = Settings::default();
        let mut repl = Repl::new(&plan, &settings, &plan.days[2], vec![]);

        repl.run("done\ndone\nquit\n".as_bytes()).unwrap();
        let output = output(&repl);
        assert_eq!(output.matches("Day finished!").count(), 1);
        assert!(output.ends_with("P set 2/2 -> done\nDay finished!\n> "));
    }
}
