use crate::error::{ClusterError, ClusterResult};
use std::fmt;

/// Wall-clock limit passed to Slurm as `--time=HH:MM:SS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallTime {
    seconds: u64,
}

impl WallTime {
    #[must_use]
    pub const fn from_hours(hours: u64) -> Self {
        Self { seconds: hours * 3600 }
    }

    #[must_use]
    pub const fn as_secs(&self) -> u64 {
        self.seconds
    }
}

impl fmt::Display for WallTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hours = self.seconds / 3600;
        let minutes = (self.seconds % 3600) / 60;
        let seconds = self.seconds % 60;
        write!(f, "{hours:02}:{minutes:02}:{seconds:02}")
    }
}

/// A single Slurm resource request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlurmResources {
    pub nodes: u32,
    /// Omitted from the request when `None` (interactive sessions leave it to Slurm).
    pub ntasks: Option<u32>,
    pub cpus_per_task: u32,
    pub gpus: u32,
    pub time: WallTime,
    pub mem_gb: u32,
}

impl SlurmResources {
    /// Interactive CPU allocation: 4 CPUs, 16 GB, 4 hours.
    #[must_use]
    pub fn interactive_cpu() -> Self {
        Self {
            nodes: 1,
            ntasks: None,
            cpus_per_task: 4,
            gpus: 0,
            time: WallTime::from_hours(4),
            mem_gb: 16,
        }
    }

    /// Interactive GPU allocation: the CPU allocation plus one GPU.
    #[must_use]
    pub fn interactive_gpu() -> Self {
        Self { gpus: 1, ..Self::interactive_cpu() }
    }

    /// Batch training allocation: 1 node, 1 task, 4 CPUs, 1 GPU, 12 hours, 16 GB.
    #[must_use]
    pub fn batch_training() -> Self {
        Self {
            nodes: 1,
            ntasks: Some(1),
            cpus_per_task: 4,
            gpus: 1,
            time: WallTime::from_hours(12),
            mem_gb: 16,
        }
    }

    pub fn validate(&self) -> ClusterResult<()> {
        if self.nodes == 0 {
            return Err(ClusterError::InvalidResources("nodes must be >= 1".to_string()));
        }
        if self.ntasks == Some(0) {
            return Err(ClusterError::InvalidResources("ntasks must be >= 1".to_string()));
        }
        if self.cpus_per_task == 0 {
            return Err(ClusterError::InvalidResources("cpus_per_task must be >= 1".to_string()));
        }
        if self.mem_gb == 0 {
            return Err(ClusterError::InvalidResources("mem_gb must be >= 1".to_string()));
        }
        Ok(())
    }

    /// Resource flags shared by `srun` and `sbatch`.
    pub fn to_args(&self) -> ClusterResult<Vec<String>> {
        self.validate()?;

        let mut args = vec![format!("--nodes={}", self.nodes)];
        if let Some(ntasks) = self.ntasks {
            args.push(format!("--ntasks={ntasks}"));
        }
        args.push(format!("--cpus-per-task={}", self.cpus_per_task));
        if self.gpus > 0 {
            args.push(format!("--gres=gpu:{}", self.gpus));
        }
        args.push(format!("--time={}", self.time));
        args.push(format!("--mem={}GB", self.mem_gb));
        Ok(args)
    }
}
