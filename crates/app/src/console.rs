//! Line-based front-end: stage select, question turns and stage results.

use std::io;

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{debug, warn};

use artikel_core::model::{ProgressState, StageNumber};
use services::{AppServices, QuestionView, SessionError, StageMenuItem, StageResult, StageSession};

const MENU_COLUMNS: usize = 10;

/// One key of an answer line: `1`-`3` pick an article, `a`-`c` a meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pick {
    Article(usize),
    Meaning(usize),
}

fn parse_picks(input: &str) -> Option<Vec<Pick>> {
    input
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            '1'..='3' => Some(Pick::Article(c as usize - '1' as usize)),
            'a'..='c' => Some(Pick::Meaning(c as usize - 'a' as usize)),
            'A'..='C' => Some(Pick::Meaning(c as usize - 'A' as usize)),
            _ => None,
        })
        .collect()
}

fn menu_cell(item: &StageMenuItem) -> String {
    match (item.unlocked, item.has_content) {
        (false, _) => "   ·".to_owned(),
        (true, true) => format!("{:>4}", item.stage.value()),
        (true, false) => format!("{:>3}?", item.stage.value()),
    }
}

pub struct Console {
    app: AppServices,
    lines: Lines<BufReader<Stdin>>,
}

impl Console {
    #[must_use]
    pub fn new(app: AppServices) -> Self {
        Self {
            app,
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Print `label` and read one line. `None` on end of input.
    async fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        println!("{label}");
        self.lines.next_line().await
    }

    pub async fn print_stages(&self, progress: &ProgressState) {
        let menu = self.app.stage_loop().stage_menu(progress).await;
        for row in menu.chunks(MENU_COLUMNS) {
            let line: String = row.iter().map(menu_cell).collect();
            println!("{line}");
        }
        println!("(· gesperrt, ? ohne Daten)");
    }

    /// Stage-select loop. Returns when the player quits or input ends.
    pub async fn run_menu(&mut self, progress: &mut ProgressState) -> io::Result<()> {
        let ads = self.app.ads();
        ads.request_banner();

        loop {
            println!();
            self.print_stages(progress).await;
            if ads.should_offer_daily_ad() {
                println!("w = tägliche Werbung ansehen");
            }
            let Some(line) = self.prompt("Stufe wählen (q = Beenden):").await? else {
                return Ok(());
            };

            match line.trim() {
                "" => {}
                "q" => return Ok(()),
                "w" => {
                    if !ads.show_daily_ad_if_due().await {
                        println!("Die tägliche Werbung gibt es erst morgen wieder.");
                    }
                }
                raw => match raw.parse::<StageNumber>() {
                    Ok(stage) => self.play_stage(stage, progress).await?,
                    Err(err) => println!("Ungültige Stufe `{raw}`: {err}"),
                },
            }
        }
    }

    /// Play one stage to its end, or until the player enters `q`.
    pub async fn play_stage(
        &mut self,
        stage: StageNumber,
        progress: &mut ProgressState,
    ) -> io::Result<()> {
        let stage_loop = self.app.stage_loop();
        let mut session = match stage_loop.start_stage(stage, progress).await {
            Ok(session) => session,
            Err(SessionError::StageLocked { unlocked, .. }) => {
                println!("Stufe {stage} ist gesperrt (freigeschaltet bis {unlocked}).");
                return Ok(());
            }
            Err(SessionError::DatasetMissing { .. }) => {
                println!("Stufe {stage} fehlt: keine Wortliste gefunden.");
                return Ok(());
            }
            Err(err) => {
                println!("Stufe {stage} kann nicht gestartet werden: {err}");
                return Ok(());
            }
        };

        loop {
            let Some(view) = self.render(&session) else {
                return Ok(());
            };
            print_question(&view);

            let Some(line) = self.prompt("> ").await? else {
                return Ok(());
            };
            let input = line.trim();
            if input == "q" {
                println!("Stufe abgebrochen.");
                return Ok(());
            }
            if !input.is_empty() {
                self.apply_picks(&mut session, &view, input);
                continue;
            }
            if !view.can_submit {
                println!("Bitte Artikel und Bedeutung wählen.");
                continue;
            }

            if !self.check_answer(&mut session).await? {
                return Ok(());
            }
            match stage_loop.advance(&mut session, progress).await {
                Ok(None) => {}
                Ok(Some(result)) => {
                    self.print_result(&result);
                    return Ok(());
                }
                Err(err) => {
                    warn!(error = %err, "could not advance stage");
                    return Ok(());
                }
            }
        }
    }

    fn render(&self, session: &StageSession) -> Option<QuestionView> {
        QuestionView::from_session(session, self.app.renderer().as_ref())
    }

    fn apply_picks(&self, session: &mut StageSession, view: &QuestionView, input: &str) {
        let Some(picks) = parse_picks(input) else {
            println!("Eingabe `{input}` nicht erkannt: 1-3 für den Artikel, a-c für die Bedeutung.");
            return;
        };
        for pick in picks {
            match pick {
                Pick::Article(i) => session.select_article(view.article_options[i]),
                Pick::Meaning(i) => session.select_meaning(view.meaning_options[i].value.clone()),
            }
        }
    }

    /// The PRÜFEN step. Returns false if input ended while waiting.
    async fn check_answer(&mut self, session: &mut StageSession) -> io::Result<bool> {
        let outcome = match self.app.stage_loop().submit_answer(session).await {
            Ok(outcome) => outcome,
            Err(err) => {
                println!("{err}");
                return Ok(true);
            }
        };
        if outcome.showed_ad {
            debug!("interstitial shown after answer");
        }

        let feedback = outcome.feedback;
        if feedback.is_correct() {
            println!("✅ Richtig!");
            tokio::time::sleep(self.app.settings().answer_delay()).await;
            return Ok(true);
        }

        let renderer = self.app.renderer();
        println!(
            "Falsch! {} {} = {}",
            feedback.correct_article,
            feedback.word,
            renderer.render(&feedback.correct_meaning)
        );
        Ok(self.prompt("Weiter mit Enter").await?.is_some())
    }

    fn print_result(&self, result: &StageResult) {
        let outcome = &result.outcome;
        println!();
        println!(
            "Stufe {} beendet: {}/{} richtig ({}%)",
            outcome.stage, outcome.correct, outcome.total, outcome.score_percent
        );
        if outcome.unlocked_next {
            println!("Bestanden! Stufe {} ist freigeschaltet.", result.unlocked_stages);
        } else if outcome.passed {
            println!("Bestanden!");
        } else {
            println!(
                "Nicht bestanden, nötig sind {}%.",
                self.app.settings().pass_threshold_percent()
            );
        }
        if !result.progress_saved {
            println!("Achtung: der Fortschritt konnte nicht gespeichert werden.");
        }
    }
}

fn print_question(view: &QuestionView) {
    println!();
    println!("Stufe {} - {}/{}", view.stage, view.question_index, view.total);
    println!("{}", view.sentence);

    let articles: Vec<String> = view
        .article_options
        .iter()
        .enumerate()
        .map(|(i, article)| {
            let mark = if view.selected_article == Some(*article) { "*" } else { " " };
            format!("{}){mark}{article}", i + 1)
        })
        .collect();
    println!("  {}", articles.join("   "));

    for (option, key) in view.meaning_options.iter().zip(['a', 'b', 'c']) {
        let mark = if view.selected_meaning.as_deref() == Some(option.value.as_str()) {
            "*"
        } else {
            " "
        };
        println!("  {key}){mark}{}", option.label);
    }
    if view.can_submit {
        println!("[PRÜFEN: Enter]");
    }
}
