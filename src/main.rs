fn main() {
    terminal_chess::terminal::run_interactive_terminal();
}
