//! Interactive ordering session.
//!
//! Reads one command per line and drives the same screens the app has:
//! onboarding until a name and email are registered, then the home screen
//! with its category chips, search box, item details, cart and checkout.
//!
//! ```text
//! menu                  show the menu with the current filter
//! category <name|all>   pick a category chip
//! search [text]         set the search text (empty clears it)
//! item <id>             show an item's details
//! add <id> [quantity]   add 1-10 of an item to the cart
//! cart                  show the cart and total
//! checkout              place the order
//! profile               show your profile
//! logout                forget your profile
//! help                  list commands
//! quit                  leave
//! ```

use std::io::{BufRead, Write};

use thiserror::Error;
use tracing::debug;

use little_lemon_app::AppError;
use little_lemon_app::cart::{Cart, QuantityPicker};
use little_lemon_app::catalog::MenuFilter;
use little_lemon_app::profile::Screen;
use little_lemon_app::state::AppState;
use little_lemon_app::storage::KeyValueStore;
use little_lemon_core::{Category, MenuItemId};

use super::{CommandError, Result, menu, profile};

const HELP: &str = "\
Commands:
  menu                  show the menu
  category <name|all>   filter by category
  search [text]         filter by title (empty clears)
  item <id>             show an item
  add <id> [quantity]   add to cart (quantity 1-10, default 1)
  cart                  show your cart
  checkout              place your order
  profile               show your profile
  logout                log out
  quit                  leave";

/// Why a typed line is not a command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Unknown command {0:?}. Type `help` for a list.")]
    Unknown(String),
    #[error("`{command}` needs {what}.")]
    MissingArgument {
        command: &'static str,
        what: &'static str,
    },
    #[error("{value:?} is not a valid {what}.")]
    InvalidArgument { value: String, what: &'static str },
}

/// A parsed home-screen command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Menu,
    Category(Option<Category>),
    Search(String),
    Item(MenuItemId),
    Add(MenuItemId, i64),
    Cart,
    Checkout,
    Profile,
    Logout,
    Help,
    Quit,
    Nothing,
}

impl Command {
    /// Parse one input line.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown commands and missing or malformed
    /// arguments.
    pub fn parse(line: &str) -> std::result::Result<Self, ParseError> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        let command = match word.to_ascii_lowercase().as_str() {
            "" => Self::Nothing,
            "menu" | "ls" => Self::Menu,
            "category" | "cat" => Self::Category(parse_category(rest)?),
            "search" => Self::Search(rest.to_owned()),
            "item" | "show" => Self::Item(parse_id("item", rest)?),
            "add" => {
                let (id, quantity) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                let quantity = match quantity.trim() {
                    "" => i64::from(QuantityPicker::MIN),
                    q => q.parse().map_err(|_| ParseError::InvalidArgument {
                        value: q.to_owned(),
                        what: "quantity",
                    })?,
                };
                Self::Add(parse_id("add", id)?, quantity)
            }
            "cart" => Self::Cart,
            "checkout" => Self::Checkout,
            "profile" => Self::Profile,
            "logout" => Self::Logout,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => return Err(ParseError::Unknown(other.to_owned())),
        };
        Ok(command)
    }
}

fn parse_category(value: &str) -> std::result::Result<Option<Category>, ParseError> {
    if value.is_empty() {
        return Err(ParseError::MissingArgument {
            command: "category",
            what: "a category name or `all`",
        });
    }
    if value.eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    value
        .parse::<Category>()
        .map(Some)
        .map_err(|_| ParseError::InvalidArgument {
            value: value.to_owned(),
            what: "category",
        })
}

fn parse_id(command: &'static str, value: &str) -> std::result::Result<MenuItemId, ParseError> {
    if value.is_empty() {
        return Err(ParseError::MissingArgument {
            command,
            what: "an item number",
        });
    }
    value.parse().map_err(|_| ParseError::InvalidArgument {
        value: value.to_owned(),
        what: "item number",
    })
}

/// A running terminal session over an [`AppState`].
pub struct Session<'a, S, R, W> {
    state: &'a mut AppState<S>,
    input: &'a mut R,
    out: &'a mut W,
    menu_filter: MenuFilter,
}

impl<'a, S, R, W> Session<'a, S, R, W>
where
    S: KeyValueStore,
    R: BufRead,
    W: Write,
{
    pub fn new(state: &'a mut AppState<S>, input: &'a mut R, out: &'a mut W) -> Self {
        Self {
            state,
            input,
            out,
            menu_filter: MenuFilter::all(),
        }
    }

    /// Run until `quit` or end of input.
    ///
    /// User mistakes are reported and the session carries on; storage and
    /// terminal failures end it.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal or the profile storage fails.
    pub fn run(mut self) -> Result<()> {
        loop {
            let keep_going = match self.state.screen() {
                Screen::Onboarding => self.onboarding()?,
                Screen::Home => self.home()?,
            };
            if !keep_going {
                writeln!(self.out, "Goodbye!")?;
                return Ok(());
            }
        }
    }

    /// One pass of the onboarding form. `false` means input ended.
    fn onboarding(&mut self) -> Result<bool> {
        writeln!(self.out, "Welcome to Little Lemon! Please register to continue.")?;
        let Some(name) = self.prompt("Name *: ")? else {
            return Ok(false);
        };
        let Some(email) = self.prompt("Email *: ")? else {
            return Ok(false);
        };

        match self.state.profile_mut().register(&name, &email) {
            Ok(()) => {
                writeln!(self.out, "Welcome, {name}!")?;
                self.show_menu()?;
            }
            Err(e) => self.report(e.into())?,
        }
        Ok(true)
    }

    /// Read and handle one home-screen command. `false` means leave.
    fn home(&mut self) -> Result<bool> {
        let prompt = match self.state.cart().badge() {
            Some(count) => format!("[cart: {count}] > "),
            None => "> ".to_owned(),
        };
        let Some(line) = self.prompt(&prompt)? else {
            return Ok(false);
        };

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                writeln!(self.out, "{e}")?;
                return Ok(true);
            }
        };
        debug!(?command, "Session command");

        match command {
            Command::Quit => return Ok(false),
            Command::Nothing => {}
            Command::Help => writeln!(self.out, "{HELP}")?,
            Command::Menu => self.show_menu()?,
            Command::Category(category) => {
                self.menu_filter.category = category;
                self.show_menu()?;
            }
            Command::Search(text) => {
                self.menu_filter.search = text;
                self.show_menu()?;
            }
            Command::Item(id) => {
                let catalog = self.state.catalog();
                match catalog.get(id) {
                    Some(item) => {
                        let in_cart = self.state.cart().quantity_of(id);
                        menu::detail(&mut *self.out, item, in_cart)?;
                    }
                    None => self.report(not_found(id))?,
                }
            }
            Command::Add(id, quantity) => self.add(id, quantity)?,
            Command::Cart => write_cart(&mut *self.out, self.state.cart())?,
            Command::Checkout => match self.state.cart_mut().checkout() {
                Ok(order) => {
                    writeln!(
                        self.out,
                        "Ordered {} items for {}.",
                        order.item_count, order.total
                    )?;
                    writeln!(self.out, "{}", order.message())?;
                }
                Err(e) => self.report(e.into())?,
            },
            Command::Profile => profile::write_profile(&mut *self.out, &self.state.profile().load())?,
            Command::Logout => {
                self.state.profile_mut().logout()?;
                self.menu_filter = MenuFilter::all();
                writeln!(self.out, "Logged out.")?;
            }
        }
        Ok(true)
    }

    fn add(&mut self, id: MenuItemId, quantity: i64) -> Result<()> {
        let picker = match QuantityPicker::with_value(quantity) {
            Ok(picker) => picker,
            Err(e) => return self.report(e.into()),
        };

        let catalog = self.state.catalog();
        let Some(item) = catalog.get(id) else {
            return self.report(not_found(id));
        };

        picker.add_to(self.state.cart_mut(), item);
        writeln!(self.out, "Added to cart!")?;
        Ok(())
    }

    fn show_menu(&mut self) -> Result<()> {
        let catalog = self.state.catalog();
        menu::list(&mut *self.out, &catalog, &self.menu_filter)?;
        Ok(())
    }

    /// Show user errors and carry on; anything else ends the session.
    fn report(&mut self, error: AppError) -> Result<()> {
        if error.is_user_error() {
            writeln!(self.out, "{error}")?;
            Ok(())
        } else {
            Err(CommandError::App(error))
        }
    }

    /// Print `text`, then read a line. `None` at end of input.
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.out, "{text}")?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_owned()))
    }
}

fn not_found(id: MenuItemId) -> AppError {
    AppError::NotFound(format!("no menu item {id}"))
}

/// Render the cart screen.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_cart(out: &mut impl Write, cart: &Cart) -> std::io::Result<()> {
    if cart.is_empty() {
        return writeln!(out, "Your cart is empty");
    }
    for line in cart.lines() {
        writeln!(
            out,
            "{:<16} x{:<3} {:>8}",
            line.item.title,
            line.quantity,
            line.item.price.to_string()
        )?;
    }
    match cart.total() {
        Ok(total) => writeln!(out, "{:<21} {:>8}", "Total", total.to_string()),
        Err(e) => writeln!(out, "Total unavailable: {e}"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use little_lemon_app::catalog::MenuCatalog;
    use little_lemon_app::config::AppConfig;
    use little_lemon_app::storage::MemoryStore;

    use super::*;

    fn state() -> AppState<MemoryStore> {
        AppState::new(AppConfig::default(), MenuCatalog::demo(), MemoryStore::new())
    }

    fn run_script(state: &mut AppState<MemoryStore>, script: &str) -> String {
        let mut input = script.as_bytes();
        let mut out = Vec::new();
        Session::new(state, &mut input, &mut out).run().unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("menu"), Ok(Command::Menu));
        assert_eq!(Command::parse("  "), Ok(Command::Nothing));
        assert_eq!(Command::parse("category all"), Ok(Command::Category(None)));
        assert_eq!(
            Command::parse("CATEGORY mains"),
            Ok(Command::Category(Some(Category::Mains)))
        );
        assert_eq!(
            Command::parse("search lemon cake"),
            Ok(Command::Search("lemon cake".to_owned()))
        );
        assert_eq!(Command::parse("search"), Ok(Command::Search(String::new())));
        assert_eq!(Command::parse("item 3"), Ok(Command::Item(MenuItemId::new(3))));
        assert_eq!(Command::parse("add 2"), Ok(Command::Add(MenuItemId::new(2), 1)));
        assert_eq!(
            Command::parse("add 2  4"),
            Ok(Command::Add(MenuItemId::new(2), 4))
        );
        assert_eq!(Command::parse("exit"), Ok(Command::Quit));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(Command::parse("dance"), Err(ParseError::Unknown(_))));
        assert!(matches!(
            Command::parse("category"),
            Err(ParseError::MissingArgument { .. })
        ));
        assert!(matches!(
            Command::parse("category soups"),
            Err(ParseError::InvalidArgument { .. })
        ));
        assert!(matches!(
            Command::parse("add"),
            Err(ParseError::MissingArgument { .. })
        ));
        assert!(matches!(
            Command::parse("add two"),
            Err(ParseError::InvalidArgument { .. })
        ));
        assert!(matches!(
            Command::parse("add 2 lots"),
            Err(ParseError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_onboarding_retries_until_valid() {
        let mut state = state();
        let screen = run_script(&mut state, "\na@b.com\nAlice\nnot-an-email\nAlice\na@b.com\nquit\n");

        assert!(screen.contains("Please enter your name."));
        assert!(screen.contains("Please enter a valid email."));
        assert!(screen.contains("Welcome, Alice!"));
        assert_eq!(state.screen(), Screen::Home);
    }

    #[test]
    fn test_end_of_input_during_onboarding() {
        let mut state = state();
        let screen = run_script(&mut state, "Alice\n");
        assert!(screen.ends_with("Goodbye!\n"));
        assert_eq!(state.screen(), Screen::Onboarding);
    }

    #[test]
    fn test_order_flow() {
        let mut state = state();
        state.profile_mut().register("Alice", "a@b.com").unwrap();

        let screen = run_script(
            &mut state,
            "category mains\nadd 3 2\nadd 4\nadd 3\ncart\ncheckout\ncart\nquit\n",
        );

        assert!(screen.contains("[cart: 3] > "));
        assert!(screen.contains("Grilled Fish     x3"));
        assert!(screen.contains("$78.99"));
        assert!(screen.contains("Ordered 4 items for $78.99."));
        assert!(screen.contains("Your food has been purchased"));
        assert!(screen.contains("Your cart is empty"));
        assert!(state.cart().is_empty());
    }

    #[test]
    fn test_user_mistakes_do_not_end_session() {
        let mut state = state();
        state.profile_mut().register("Alice", "a@b.com").unwrap();

        let screen = run_script(
            &mut state,
            "add 99\nadd 1 11\nadd 1 0\nitem 42\ncheckout\ndance\nadd 1\nquit\n",
        );

        assert!(screen.contains("Not found: no menu item 99"));
        assert!(screen.contains("quantity must be between 1 and 10, got 11"));
        assert!(screen.contains("got 0"));
        assert!(screen.contains("Not found: no menu item 42"));
        assert!(screen.contains("your cart is empty"));
        assert!(screen.contains("Unknown command \"dance\""));
        assert_eq!(state.cart().item_count(), 1);
    }

    #[test]
    fn test_cart_screen_without_a_total() {
        let mut cart = Cart::default();
        let catalog = MenuCatalog::demo();
        let mut euro_salad = catalog.items()[0].clone();
        euro_salad.id = MenuItemId::new(50);
        euro_salad.price = "€9.00".parse().unwrap();
        cart.add(&catalog.items()[1], 1);
        cart.add(&euro_salad, 1);

        let mut out = Vec::new();
        write_cart(&mut out, &cart).unwrap();
        let screen = String::from_utf8(out).unwrap();
        assert!(screen.contains("Bruschetta"));
        assert!(screen.contains("Total unavailable: cannot combine USD and EUR amounts"));
    }

    #[test]
    fn test_search_and_item() {
        let mut state = state();
        state.profile_mut().register("Alice", "a@b.com").unwrap();

        let screen = run_script(&mut state, "search LEMON\nitem 5\nquit\n");
        assert!(screen.contains("Lemon Dessert"));
        assert!(!screen.contains("Greek Salad"));
        assert!(screen.contains("Ricotta lemon cake."));
    }

    #[test]
    fn test_logout_returns_to_onboarding() {
        let mut state = state();
        state.profile_mut().register("Alice", "a@b.com").unwrap();

        let screen = run_script(&mut state, "logout\nBob\nbob@example.com\nquit\n");
        assert!(screen.contains("Logged out."));
        assert!(screen.contains("Please register to continue."));
        assert_eq!(state.profile().load().first_name, "Bob");
    }
}
