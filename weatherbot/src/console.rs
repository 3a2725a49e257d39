//! Stand-in for a chat host: stdin lines in, messages out on stdout.

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, error, info};
use weatherbot_core::{Action, CommandService, Invocation};

const ROOM_ID: &str = "!console:localhost";
const USER_ID: &str = "@console:localhost";

pub async fn run<S: CommandService>(service: &S) -> anyhow::Result<()> {
    info!(
        service = service.service_type(),
        "Console host ready; type `!weather <location>` (Ctrl-D to quit)"
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let Some((action, invocation)) = route(service, &line) else {
            debug!(line = %line, "Ignoring non-command line");
            continue;
        };

        match service.execute(action, &invocation).await {
            Ok(msg) => println!("[{}] {}", msg.msgtype, msg.body),
            Err(err) => {
                error!(error = %err, "Command failed");
                println!("[error] {err}");
            }
        }
    }

    Ok(())
}

/// Match a `!`-prefixed line against the service's command table, longest path first.
fn route<S: CommandService + ?Sized>(service: &S, line: &str) -> Option<(Action, Invocation)> {
    let tokens: Vec<&str> = line.trim().strip_prefix('!')?.split_whitespace().collect();

    let mut commands: Vec<_> = service.commands().iter().collect();
    commands.sort_by_key(|c| std::cmp::Reverse(c.path.len()));

    commands.into_iter().find_map(|command| {
        command.strip_path(tokens.as_slice()).map(|args| {
            let invocation = Invocation {
                room_id: ROOM_ID.to_string(),
                user_id: USER_ID.to_string(),
                args: args.iter().map(|a| a.to_string()).collect(),
            };
            (command.action, invocation)
        })
    })
}
