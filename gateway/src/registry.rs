//! Declarative module-operation registry.
//!
//! Maps operator-facing operation names to execution-module function
//! names plus an argument-arity contract. The CLI resolves an operation
//! here and routes it through the one generic dispatcher instead of
//! growing a bespoke wrapper per operation.

/// Variadic upper bound for operations taking any number of arguments.
pub const VARIADIC: usize = usize::MAX;

/// One registered operation.
#[derive(Debug, Clone, Copy)]
pub struct ModuleOp {
    /// Operator-facing name, e.g. `pkg.install`.
    pub op: &'static str,
    /// Fully-qualified execution-module function on the master.
    pub function: &'static str,
    pub min_args: usize,
    pub max_args: usize,
}

impl ModuleOp {
    pub fn check_arity(&self, argc: usize) -> Result<(), String> {
        if argc < self.min_args {
            return Err(format!(
                "{} expects at least {} argument(s), got {argc}",
                self.op, self.min_args
            ));
        }
        if argc > self.max_args {
            return Err(format!(
                "{} expects at most {} argument(s), got {argc}",
                self.op, self.max_args
            ));
        }
        Ok(())
    }
}

macro_rules! op {
    ($op:literal, $function:literal, $min:expr, $max:expr) => {
        ModuleOp {
            op: $op,
            function: $function,
            min_args: $min,
            max_args: $max,
        }
    };
}

/// Every pass-through operation the CLI exposes. Operations whose wire
/// arguments need shaping (archive tar flags, kubectl pass-through) build
/// their `Call` directly instead of going through this table.
pub const MODULE_OPS: &[ModuleOp] = &[
    // Package management
    op!("pkg.install", "pkg.install", 1, VARIADIC),
    op!("pkg.remove", "pkg.remove", 1, VARIADIC),
    op!("pkg.upgrade", "pkg.upgrade", 0, VARIADIC),
    op!("pkg.list", "pkg.list_pkgs", 0, 0),
    // Service control
    op!("service.start", "service.start", 1, 1),
    op!("service.stop", "service.stop", 1, 1),
    op!("service.restart", "service.restart", 1, 1),
    op!("service.status", "service.status", 1, 1),
    op!("service.enable", "service.enable", 1, 1),
    op!("service.disable", "service.disable", 1, 1),
    op!("service.list", "service.get_all", 0, 0),
    // Filesystem
    op!("file.read", "cp.get_file_str", 1, 1),
    op!("file.write", "file.write", 2, 2),
    op!("file.remove", "file.remove", 1, 1),
    op!("file.exists", "file.file_exists", 1, 1),
    op!("file.chmod", "file.set_mode", 2, 2),
    op!("file.chown", "file.chown", 3, 3),
    op!("file.copy", "file.copy", 2, 2),
    // System
    op!("system.reboot", "system.reboot", 0, 0),
    op!("system.uptime", "status.uptime", 0, 0),
    op!("system.disk", "disk.usage", 0, 0),
    op!("system.memory", "status.meminfo", 0, 0),
    op!("system.cpu", "status.cpuinfo", 0, 0),
    op!("system.time", "system.get_system_time", 0, 0),
    op!("system.kernel", "system.get_kernel", 0, 0),
    // Users
    op!("user.add", "user.add", 1, 1),
    op!("user.delete", "user.delete", 1, 1),
    op!("user.list", "user.list_users", 0, 0),
    op!("user.info", "user.info", 1, 1),
    // Docker
    op!("docker.ps", "docker.ps", 0, 0),
    op!("docker.start", "docker.start", 1, 1),
    op!("docker.stop", "docker.stop", 1, 1),
    op!("docker.restart", "docker.restart", 1, 1),
    // Cron
    op!("cron.list", "cron.list_tab", 1, 1),
    op!("cron.add", "cron.set_job", 7, 7),
    op!("cron.remove", "cron.rm_job", 2, 2),
    // Archives (zip family passes straight through; tar needs flag
    // shaping and is built by the CLI)
    op!("archive.zip", "archive.zip", 2, 2),
    op!("archive.unzip", "archive.unzip", 2, 2),
    // Mounts
    op!("mount.list", "mount.active", 0, 0),
    op!("mount.mount", "mount.mount", 3, 3),
    op!("mount.umount", "mount.umount", 1, 1),
    // SSH keys
    op!("ssh.keygen", "ssh.key_gen", 2, 2),
    op!("ssh.authkeys", "ssh.auth_keys", 1, 1),
    op!("ssh.setkey", "ssh.set_auth_key", 2, 2),
    // Git
    op!("git.clone", "git.clone", 2, 2),
    op!("git.pull", "git.pull", 1, 1),
    // Pillar
    op!("pillar.get", "pillar.get", 1, 1),
    op!("pillar.items", "pillar.items", 0, 0),
    // Jobs
    op!("job.list", "saltutil.find_job", 0, 0),
    op!("job.kill", "saltutil.kill_job", 1, 1),
    op!("job.sync", "saltutil.sync_all", 0, 0),
    // Network
    op!("network.ping", "network.ping", 1, 2),
    op!("network.traceroute", "network.traceroute", 1, 1),
    op!("network.netstat", "network.netstat", 0, 0),
    op!("network.connections", "network.active_tcp", 0, 0),
    op!("network.routes", "network.routes", 0, 0),
    op!("network.arp", "network.arp", 0, 0),
    // Processes
    op!("process.list", "ps.pgrep", 1, 1),
    op!("process.top", "ps.top", 0, 0),
    op!("process.kill", "ps.kill_pid", 1, 2),
    op!("process.info", "ps.proc_info", 1, 1),
    // Monitoring
    op!("monitor.load", "status.loadavg", 0, 0),
    op!("monitor.iostat", "disk.iostat", 0, 0),
    op!("monitor.netstats", "status.netstats", 0, 0),
    op!("monitor.info", "status.all_status", 0, 0),
    // Grains
    op!("grains.items", "grains.items", 0, 0),
    op!("grains.get", "grains.get", 1, 1),
    op!("grains.set", "grains.setval", 2, 2),
    op!("grains.delete", "grains.delval", 1, 1),
    // States
    op!("state.apply", "state.apply", 1, 1),
    op!("state.highstate", "state.highstate", 0, 0),
];

/// Resolve an operation by its operator-facing name.
pub fn lookup(op: &str) -> Option<&'static ModuleOp> {
    MODULE_OPS.iter().find(|entry| entry.op == op)
}
