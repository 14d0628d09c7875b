//! # Console
//!
//! Line-oriented front end: one command per line, results or error
//! messages printed back. Actions that move points or remove records ask
//! for a y/N confirmation first.
//!
//! ## Session
//! ```text
//! > redeem 1 1 3
//! Alice redeemed 3 x Booster Pack
//! Total cost: 60 points
//! New balance: 40 points
//! > cancel 1
//! Cancel order #1 for Alice (refund 60 points)? [y/N] y
//! Order #1 has been cancelled.
//! Alice's new balance: 100 points.
//! ```

use std::io;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};
use tracing::debug;

use crate::commands::customer::{self, CustomerDto};
use crate::commands::order::{self, PendingOrderDto};
use crate::commands::reward::{self, RewardDto};
use crate::error::ApiError;
use crate::state::ShopState;

const HELP: &str = "\
Customer:
  customers                               List customers and balances
  rewards                                 List rewards
  redeem <customer> <reward> <quantity>   Redeem a reward
Employee:
  issue <customer> <points>               Issue points
  pending                                 List pending orders
  fulfill <order>                         Fulfill a pending order
  cancel <order>                          Cancel a pending order (refund)
Admin:
  add-customer <email> <points> <name>    Add a customer
  delete-customer <customer>              Delete a customer without orders
  add-reward <cost> <name>                Add a reward
  delete-reward <reward>                  Delete a reward without orders
Other:
  help                                    Show this help
  quit                                    Exit
";

/// A parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    Customers,
    Rewards,
    Pending,
    Redeem {
        customer_id: i64,
        reward_id: i64,
        quantity: i64,
    },
    Issue {
        customer_id: i64,
        points: i64,
    },
    Fulfill {
        order_id: i64,
    },
    Cancel {
        order_id: i64,
    },
    AddCustomer {
        name: String,
        email: String,
        points: i64,
    },
    DeleteCustomer {
        customer_id: i64,
    },
    AddReward {
        name: String,
        cost: i64,
    },
    DeleteReward {
        reward_id: i64,
    },
}

/// Parses one console line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, ApiError> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let command = match verb.to_ascii_lowercase().as_str() {
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        "customers" => Command::Customers,
        "rewards" => Command::Rewards,
        "pending" | "orders" => Command::Pending,
        "redeem" => {
            let [customer, reward, quantity] =
                exact::<3>(&args, "redeem <customer> <reward> <quantity>")?;
            Command::Redeem {
                customer_id: parse_int("customer", customer)?,
                reward_id: parse_int("reward", reward)?,
                quantity: parse_int("quantity", quantity)?,
            }
        }
        "issue" => {
            let [customer, points] = exact::<2>(&args, "issue <customer> <points>")?;
            Command::Issue {
                customer_id: parse_int("customer", customer)?,
                points: parse_int("points", points)?,
            }
        }
        "fulfill" | "fulfil" => {
            let [order] = exact::<1>(&args, "fulfill <order>")?;
            Command::Fulfill {
                order_id: parse_int("order", order)?,
            }
        }
        "cancel" => {
            let [order] = exact::<1>(&args, "cancel <order>")?;
            Command::Cancel {
                order_id: parse_int("order", order)?,
            }
        }
        "add-customer" => {
            if args.len() < 3 {
                return Err(usage("add-customer <email> <points> <name>"));
            }
            Command::AddCustomer {
                email: args[0].to_string(),
                points: parse_int("points", args[1])?,
                name: args[2..].join(" "),
            }
        }
        "delete-customer" => {
            let [customer] = exact::<1>(&args, "delete-customer <customer>")?;
            Command::DeleteCustomer {
                customer_id: parse_int("customer", customer)?,
            }
        }
        "add-reward" => {
            if args.len() < 2 {
                return Err(usage("add-reward <cost> <name>"));
            }
            Command::AddReward {
                cost: parse_int("cost", args[0])?,
                name: args[1..].join(" "),
            }
        }
        "delete-reward" => {
            let [reward] = exact::<1>(&args, "delete-reward <reward>")?;
            Command::DeleteReward {
                reward_id: parse_int("reward", reward)?,
            }
        }
        other => {
            return Err(ApiError::invalid_input(format!(
                "Unknown command '{other}'. Type 'help' for a list of commands."
            )))
        }
    };

    Ok(Some(command))
}

fn exact<'a, const N: usize>(args: &[&'a str], form: &str) -> Result<[&'a str; N], ApiError> {
    <[&'a str; N]>::try_from(args).map_err(|_| usage(form))
}

fn usage(form: &str) -> ApiError {
    ApiError::invalid_input(format!("Usage: {form}"))
}

fn parse_int(field: &str, value: &str) -> Result<i64, ApiError> {
    value.parse::<i64>().map_err(|_| {
        ApiError::invalid_input(format!("{field} must be a whole number, got '{value}'"))
    })
}

/// Interactive console over any line reader and writer.
pub struct Console<'a, R, W> {
    shop: &'a ShopState,
    lines: Lines<R>,
    out: W,
}

impl<'a, R, W> Console<'a, R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(shop: &'a ShopState, input: R, out: W) -> Self {
        Console {
            shop,
            lines: input.lines(),
            out,
        }
    }

    /// Reads and executes commands until end of input or `quit`.
    pub async fn run(&mut self) -> io::Result<()> {
        self.print("Rewards Shop. Type 'help' for commands.\n").await?;

        loop {
            self.print("> ").await?;
            let Some(line) = self.lines.next_line().await? else {
                break;
            };

            let command = match parse_command(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) => {
                    self.print_error(&e).await?;
                    continue;
                }
            };
            debug!(?command, "Console command");

            if command == Command::Quit {
                break;
            }
            if let Err(e) = self.execute(command).await {
                self.report(e).await?;
            }
        }

        self.print("Goodbye.\n").await
    }

    async fn execute(&mut self, command: Command) -> Result<(), ConsoleError> {
        let shop = self.shop;
        match command {
            Command::Help => self.print(HELP).await?,
            Command::Quit => {}
            Command::Customers => {
                let customers = customer::list_customers(shop).await?;
                self.print(&render_customers(&customers)).await?;
            }
            Command::Rewards => {
                let rewards = reward::list_rewards(shop).await?;
                self.print(&render_rewards(&rewards)).await?;
            }
            Command::Pending => {
                let orders = order::list_pending_orders(shop).await?;
                self.print(&render_pending(&orders)).await?;
            }
            Command::Redeem {
                customer_id,
                reward_id,
                quantity,
            } => {
                let r = order::redeem(shop, customer_id, reward_id, quantity).await?;
                self.print(&format!(
                    "{} redeemed {} x {}\nTotal cost: {} points\nNew balance: {} points\n",
                    r.customer.name, r.quantity, r.reward.name, r.total_cost, r.customer.points
                ))
                .await?;
            }
            Command::Issue {
                customer_id,
                points,
            } => {
                let target = customer::get_customer(shop, customer_id).await?;
                if self
                    .confirm(&format!("Issue {points} points to {}?", target.name))
                    .await?
                {
                    let c = customer::issue_points(shop, customer_id, points).await?;
                    self.print(&format!(
                        "Issued {points} points to {}.\nNew balance: {} points.\n",
                        c.name, c.points
                    ))
                    .await?;
                }
            }
            Command::Fulfill { order_id } => {
                let question = self.find_pending(order_id).await?.map(|o| {
                    format!(
                        "Fulfill order #{} for {}: {} x{}?",
                        o.id, o.customer_name, o.reward_name, o.quantity
                    )
                });
                if self.confirm_if_known(question).await? {
                    let o = order::fulfill_order(shop, order_id).await?;
                    self.print(&format!("Order #{} has been fulfilled.\n", o.id))
                        .await?;
                }
            }
            Command::Cancel { order_id } => {
                let question = self.find_pending(order_id).await?.map(|o| {
                    format!(
                        "Cancel order #{} for {} (refund {} points)?",
                        o.id, o.customer_name, o.points_spent
                    )
                });
                if self.confirm_if_known(question).await? {
                    let c = order::cancel_order(shop, order_id).await?;
                    self.print(&format!(
                        "Order #{order_id} has been cancelled.\n{}'s new balance: {} points.\n",
                        c.name, c.points
                    ))
                    .await?;
                }
            }
            Command::AddCustomer {
                name,
                email,
                points,
            } => {
                let c = customer::add_customer(shop, &name, &email, points).await?;
                self.print(&format!("Customer added: #{} {} <{}>\n", c.id, c.name, c.email))
                    .await?;
            }
            Command::DeleteCustomer { customer_id } => {
                let target = customer::get_customer(shop, customer_id).await?;
                if self
                    .confirm(&format!(
                        "Are you sure you want to delete customer '{}'?",
                        target.name
                    ))
                    .await?
                {
                    customer::delete_customer(shop, customer_id).await?;
                    self.print("Customer deleted.\n").await?;
                }
            }
            Command::AddReward { name, cost } => {
                let r = reward::add_reward(shop, &name, cost).await?;
                self.print(&format!("Reward added: #{} {} ({} points)\n", r.id, r.name, r.cost))
                    .await?;
            }
            Command::DeleteReward { reward_id } => {
                let question = reward::list_rewards(shop)
                    .await?
                    .into_iter()
                    .find(|r| r.id == reward_id)
                    .map(|r| format!("Are you sure you want to delete reward '{}'?", r.name));
                if self.confirm_if_known(question).await? {
                    reward::delete_reward(shop, reward_id).await?;
                    self.print("Reward deleted.\n").await?;
                }
            }
        }
        Ok(())
    }

    async fn find_pending(&self, order_id: i64) -> Result<Option<PendingOrderDto>, ApiError> {
        let orders = order::list_pending_orders(self.shop).await?;
        Ok(orders.into_iter().find(|o| o.id == order_id))
    }

    /// Asks `question` when there is one. Without one the target is missing
    /// or not pending, and the command runs so the service reports why.
    async fn confirm_if_known(&mut self, question: Option<String>) -> io::Result<bool> {
        match question {
            Some(question) => self.confirm(&question).await,
            None => Ok(true),
        }
    }

    async fn confirm(&mut self, question: &str) -> io::Result<bool> {
        self.print(&format!("{question} [y/N] ")).await?;
        let answer = self.lines.next_line().await?.unwrap_or_default();
        let yes = matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes");
        if !yes {
            self.print("Nothing changed.\n").await?;
        }
        Ok(yes)
    }

    async fn report(&mut self, err: ConsoleError) -> io::Result<()> {
        match err {
            ConsoleError::Api(e) => self.print_error(&e).await,
            ConsoleError::Io(e) => Err(e),
        }
    }

    async fn print_error(&mut self, err: &ApiError) -> io::Result<()> {
        self.print(&format!("Error: {}\n", err.message)).await
    }

    async fn print(&mut self, text: &str) -> io::Result<()> {
        self.out.write_all(text.as_bytes()).await?;
        self.out.flush().await
    }
}

/// Failure while executing a command: a business error to show, or a
/// broken terminal that ends the session.
#[derive(Debug)]
enum ConsoleError {
    Api(ApiError),
    Io(io::Error),
}

impl From<ApiError> for ConsoleError {
    fn from(err: ApiError) -> Self {
        ConsoleError::Api(err)
    }
}

impl From<io::Error> for ConsoleError {
    fn from(err: io::Error) -> Self {
        ConsoleError::Io(err)
    }
}

fn render_customers(customers: &[CustomerDto]) -> String {
    if customers.is_empty() {
        return "No customers.\n".to_string();
    }
    customers
        .iter()
        .map(|c| format!("#{:<4} {:<20} {:<28} {:>8} pts\n", c.id, c.name, c.email, c.points))
        .collect()
}

fn render_rewards(rewards: &[RewardDto]) -> String {
    if rewards.is_empty() {
        return "No rewards.\n".to_string();
    }
    rewards
        .iter()
        .map(|r| format!("#{:<4} {:<24} {:>8} pts\n", r.id, r.name, r.cost))
        .collect()
}

fn render_pending(orders: &[PendingOrderDto]) -> String {
    if orders.is_empty() {
        return "No pending orders.\n".to_string();
    }
    orders
        .iter()
        .map(|o| {
            format!(
                "#{:<4} {:<16} {} x{:<3} {:>6} pts  {}\n",
                o.id,
                o.customer_name,
                o.reward_name,
                o.quantity,
                o.points_spent,
                o.order_time.format("%Y-%m-%d %H:%M")
            )
        })
        .collect()
}
