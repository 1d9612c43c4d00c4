//! Command-line configuration for the `csfgraph` binary.

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandLineConfig {
    pub input: Option<String>,
    pub command: String,
    pub command_args: Vec<String>,
    pub verbose: bool,
}

impl CommandLineConfig {
    pub fn from_args(args: &[&str]) -> Result<Self, String> {
        let mut input = None;
        let mut command = String::from("summary");
        let mut command_args = Vec::new();
        let mut verbose = false;
        let mut command_set = false;
        let mut iter = args.iter().skip(1);
        while let Some(arg) = iter.next() {
            if command_set {
                command_args.push(arg.to_string());
                continue;
            }
            match *arg {
                "--input" | "-i" => {
                    input = Some(
                        iter.next()
                            .ok_or_else(|| "--input requires a value".to_string())?
                            .to_string(),
                    );
                }
                "--verbose" | "-v" => {
                    verbose = true;
                }
                "--command" => {
                    command = iter
                        .next()
                        .ok_or_else(|| "--command requires a value".to_string())?
                        .to_string();
                    command_set = true;
                }
                other if other.starts_with('-') => {
                    return Err(format!("unknown flag {other}"));
                }
                _ => {
                    command = arg.to_string();
                    command_set = true;
                }
            }
        }
        Ok(Self {
            input,
            command,
            command_args,
            verbose,
        })
    }

    /// Value following `flag` among the command arguments.
    pub fn command_flag(&self, flag: &str) -> Option<&str> {
        let mut iter = self.command_args.iter();
        while let Some(arg) = iter.next() {
            if arg == flag {
                return iter.next().map(String::as_str);
            }
        }
        None
    }

    pub fn help() -> &'static str {
        "Usage: csfgraph --input PATH [--verbose] [--command] COMMAND [ARGS]\n\
         \n\
         Commands:\n  \
           summary                          node and edge counts (default)\n  \
           stats                            node-type and edge-type distribution\n  \
           nodes                            all node labels in index order\n  \
           edges                            all directed edges\n  \
           neighbors --node LABEL           neighbors of LABEL with weights\n  \
           weight --source A --dest B       weight of the edge A -> B\n  \
           has-edge --source A --dest B     whether the edge A -> B exists\n  \
           validate                         check the adjacency layout invariants\n"
    }
}
