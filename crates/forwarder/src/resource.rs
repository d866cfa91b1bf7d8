//! Static catalog of the proxied resource families. Each kind maps to a
//! rendering descriptor at compile time, so a missing entry is a build
//! error rather than a runtime lookup miss.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Droplets,
    Apps,
    Databases,
    LoadBalancers,
    Volumes,
    KubernetesClusters,
    Projects,
    Images,
    Domains,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResourceDescriptor {
    pub label: &'static str,
    pub icon: &'static str,
    pub upstream_path: &'static str,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 9] = [
        ResourceKind::Droplets,
        ResourceKind::Apps,
        ResourceKind::Databases,
        ResourceKind::LoadBalancers,
        ResourceKind::Volumes,
        ResourceKind::KubernetesClusters,
        ResourceKind::Projects,
        ResourceKind::Images,
        ResourceKind::Domains,
    ];

    pub const fn descriptor(self) -> ResourceDescriptor {
        match self {
            ResourceKind::Droplets => ResourceDescriptor {
                label: "Droplets",
                icon: "droplet",
                upstream_path: "/droplets",
            },
            ResourceKind::Apps => ResourceDescriptor {
                label: "App Platform",
                icon: "app-platform",
                upstream_path: "/apps",
            },
            ResourceKind::Databases => ResourceDescriptor {
                label: "Databases",
                icon: "database",
                upstream_path: "/databases",
            },
            ResourceKind::LoadBalancers => ResourceDescriptor {
                label: "Load Balancers",
                icon: "load-balancer",
                upstream_path: "/load_balancers",
            },
            ResourceKind::Volumes => ResourceDescriptor {
                label: "Volumes",
                icon: "volume",
                upstream_path: "/volumes",
            },
            ResourceKind::KubernetesClusters => ResourceDescriptor {
                label: "Kubernetes",
                icon: "kubernetes",
                upstream_path: "/kubernetes/clusters",
            },
            ResourceKind::Projects => ResourceDescriptor {
                label: "Projects",
                icon: "project",
                upstream_path: "/projects",
            },
            ResourceKind::Images => ResourceDescriptor {
                label: "Images",
                icon: "image",
                upstream_path: "/images",
            },
            ResourceKind::Domains => ResourceDescriptor {
                label: "Domains",
                icon: "domain",
                upstream_path: "/domains",
            },
        }
    }
}
