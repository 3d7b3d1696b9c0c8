//! UCI command loop.

use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::time::Instant;

use cobalt_chess::board::search::{IterationInfo, SearchLimits};
use cobalt_chess::board::Board;
use cobalt_chess::engine::{allocate_time, EngineController};
use cobalt_chess::uci::command::{parse_go_params, parse_uci_command, UciCommand};
use cobalt_chess::uci::options::{parse_setoption, UciOptionAction, UciOptions};
use cobalt_chess::uci::print::{
    print_bestmove, print_info_string, print_perft_info, print_ready, print_search_info,
};
use cobalt_chess::uci::try_parse_position_command;
use cobalt_chess::uci::UciError;
use cobalt_chess::variant::Variant;

struct UciSession {
    controller: EngineController,
    options: UciOptions,
    uci_plus_mode: bool,
}

impl UciSession {
    fn new() -> Self {
        let options = UciOptions::new();
        let mut controller = EngineController::new(options.hash_mb);
        controller.set_info_callback(Some(Arc::new(|info: &IterationInfo| {
            print_search_info(info);
            let _ = io::stdout().flush();
        })));

        UciSession {
            controller,
            options,
            uci_plus_mode: false,
        }
    }

    fn handle_position(&mut self, parts: &[String]) {
        self.controller.stop_search();
        let parts_ref: Vec<&str> = parts.iter().map(String::as_str).collect();
        match try_parse_position_command(self.controller.board_mut(), &parts_ref) {
            Ok(()) => {}
            Err(UciError::InvalidMove { move_str, .. }) => {
                print_info_string(&format!("Invalid move: {move_str}"));
            }
            Err(UciError::InvalidFen(_)) => {
                print_info_string("Invalid FEN string");
            }
            Err(UciError::MissingParts) => {}
        }
    }

    fn handle_go(&mut self, parts: &[String]) {
        let parts_ref: Vec<&str> = parts.iter().map(String::as_str).collect();
        let params = parse_go_params(&parts_ref);

        let budget = allocate_time(&params, self.controller.board().white_to_move());
        let max_depth = params.depth.unwrap_or(self.options.depth);
        let limits = SearchLimits::depth(max_depth).with_budget(budget);

        self.controller.start_search(limits, |report| {
            print_bestmove(report.best_move);
            let _ = io::stdout().flush();
        });
    }

    fn handle_perft(&mut self, depth: usize) {
        let mut board = self.controller.board().clone();
        let start = Instant::now();
        let nodes = board.perft(depth);
        print_perft_info(depth, nodes, start.elapsed());
    }

    fn handle_setoption(&mut self, parts: &[String]) {
        let parts_ref: Vec<&str> = parts.iter().map(String::as_str).collect();
        let Some((name, value)) = parse_setoption(&parts_ref) else {
            return;
        };

        match self.options.apply_setoption(&name, value.as_deref()) {
            Some(UciOptionAction::ReinitHash(mb)) => self.controller.resize_hash(mb),
            Some(UciOptionAction::ClearHash) => self.controller.clear_hash(),
            Some(UciOptionAction::SetVariant(variant)) => {
                if self.uci_plus_mode {
                    self.handle_variant(Some(variant.as_str()));
                }
            }
            None => {}
        }
    }

    fn handle_variant(&mut self, name: Option<&str>) {
        let Some(name) = name else {
            print_info_string("Error: variant command requires variant name");
            return;
        };

        let Some(variant) = Variant::from_name(name) else {
            print_info_string(&format!("Error: unsupported variant: {name}"));
            return;
        };

        self.controller.set_variant(variant);
        // Each variant starts from the standard initial position
        self.controller.set_board(Board::new());
        print_info_string(&format!("variant {}", variant.name()));
        print_info_string(&format!("Variant {} loaded successfully", variant.name()));
    }

    fn handle_listvariants(&self) {
        let names: Vec<&str> = Variant::ALL.iter().map(|v| v.name()).collect();
        print_info_string(&format!("Available variants: {}", names.join(" ")));
    }

    fn handle_setrule(&self, parts: &[String]) {
        if parts.len() < 3 {
            print_info_string("Error: setrule requires rule name and parameters");
            return;
        }

        let rule_name = &parts[1];
        if rule_name != Variant::KingOfTheHill.name() {
            print_info_string("Error: only king_of_the_hill rule is supported in this version");
            return;
        }

        print_info_string(&format!("rule {rule_name} configured"));
    }

    fn handle_listrules(&self) {
        if self.controller.variant() == Variant::KingOfTheHill {
            print_info_string("Active rules: king_of_the_hill");
        } else {
            print_info_string("No custom rules active (standard chess rules apply)");
        }
        print_info_string("Available rules: king_of_the_hill");
    }

    /// Process one input line. Returns false when the session should end.
    fn process(&mut self, line: &str) -> bool {
        let Some(command) = parse_uci_command(line) else {
            return true;
        };

        match command {
            UciCommand::Uci => {
                self.uci_plus_mode = false;
                self.options.print_uci();
            }
            UciCommand::UciPlus => {
                self.uci_plus_mode = true;
                self.options.print_uciplus(self.controller.variant());
            }
            UciCommand::IsReady => {
                self.controller.wait_for_search();
                print_ready();
            }
            UciCommand::UciNewGame => self.controller.new_game(),
            UciCommand::Position(parts) => self.handle_position(&parts),
            UciCommand::Go(parts) => self.handle_go(&parts),
            UciCommand::Perft(depth) => self.handle_perft(depth),
            UciCommand::SetOption(parts) => self.handle_setoption(&parts),
            UciCommand::Stop => self.controller.signal_stop(),
            UciCommand::Quit => {
                self.controller.stop_search();
                return false;
            }
            // UCI+ commands are only live after the uciplus handshake
            UciCommand::Variant(name) if self.uci_plus_mode => {
                self.handle_variant(name.as_deref());
            }
            UciCommand::ListVariants if self.uci_plus_mode => self.handle_listvariants(),
            UciCommand::SetRule(parts) if self.uci_plus_mode => self.handle_setrule(&parts),
            UciCommand::ListRules if self.uci_plus_mode => self.handle_listrules(),
            // Everything else is silently ignored per UCI
            _ => {}
        }

        true
    }
}

fn main() {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut session = UciSession::new();

    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        if !session.process(&line) {
            break;
        }
        let _ = stdout.flush();
    }
}
